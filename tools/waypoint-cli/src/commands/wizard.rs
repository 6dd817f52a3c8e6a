//! Drive the sign-up wizard from a terminal.

use anyhow::{anyhow, Result};
use dialoguer::{Confirm, Input, Select};
use waypoint_core::WIZARD_BASE;
use waypoint_wizard::{
    FieldUpdate, Plan, Submission, WizardData, WizardError, WizardFlow, WizardStep,
};

use super::WizardArgs;
use crate::context::Context;

/// Run the wizard command.
pub async fn run(args: WizardArgs, ctx: &Context) -> Result<()> {
    let flow = WizardFlow::at_path(&args.start);
    let submission = if args.is_unattended() {
        unattended(flow, &args, ctx)?
    } else {
        interactive(flow, ctx)?
    };

    if ctx.output.is_json() {
        ctx.output.json(&submission);
    } else {
        ctx.output.success(submission.acknowledgment());
        print_summary(&submission.data, ctx);
    }
    Ok(())
}

/// Fill in the flags, advance through every step and submit.
fn unattended(mut flow: WizardFlow, args: &WizardArgs, ctx: &Context) -> Result<Submission> {
    if let Some(name) = &args.name {
        flow.update(FieldUpdate::Name(name.clone()));
    }
    if let Some(email) = &args.email {
        flow.update(FieldUpdate::Email(email.clone()));
    }
    if let Some(plan) = &args.plan {
        let plan: Plan = plan.parse().map_err(|e: String| anyhow!(e))?;
        flow.update(FieldUpdate::Plan(Some(plan)));
    }
    if args.agree {
        flow.update(FieldUpdate::AgreeTerms(true));
    }

    while !flow.step().is_last() {
        ctx.output.debug(&format!(
            "{} {}",
            flow.progress().render_text(),
            flow.step().title()
        ));
        flow.advance().map_err(|e| refusal(&e, ctx))?;
    }

    flow.submit().map_err(|e| refusal(&e, ctx))
}

fn interactive(mut flow: WizardFlow, ctx: &Context) -> Result<Submission> {
    loop {
        let step = flow.step();
        ctx.output.header(&format!(
            "{}  {}",
            flow.progress().render_text(),
            step.title()
        ));
        ctx.output.debug(&format!("at {}", step.href(WIZARD_BASE)));

        prompt_fields(&mut flow, step, ctx)?;

        let actions: &[&str] = match step {
            WizardStep::Details => &["Next", "Quit"],
            WizardStep::Plan => &["Next", "Back", "Quit"],
            WizardStep::Confirm => &["Submit", "Back", "Quit"],
        };
        let choice = Select::new()
            .with_prompt("Continue")
            .items(actions)
            .default(0)
            .interact()?;

        match actions[choice] {
            "Next" => {
                if let Err(e) = flow.advance() {
                    show_errors(&e, ctx);
                }
            }
            "Back" => {
                flow.go_back()?;
            }
            "Submit" => match flow.submit() {
                Ok(submission) => return Ok(submission),
                Err(e) => show_errors(&e, ctx),
            },
            _ => return Err(anyhow!("Wizard abandoned on step {}", step)),
        }
    }
}

fn prompt_fields(flow: &mut WizardFlow, step: WizardStep, ctx: &Context) -> Result<()> {
    match step {
        WizardStep::Details => {
            let name: String = Input::new()
                .with_prompt("Name")
                .with_initial_text(flow.data().name.clone())
                .allow_empty(true)
                .interact_text()?;
            flow.update(FieldUpdate::Name(name));

            let email: String = Input::new()
                .with_prompt("Email")
                .with_initial_text(flow.data().email.clone())
                .allow_empty(true)
                .interact_text()?;
            flow.update(FieldUpdate::Email(email));
        }
        WizardStep::Plan => {
            let labels: Vec<String> = Plan::ALL
                .iter()
                .map(|p| format!("{} ({})", p.display_name(), p.price_label()))
                .collect();
            let current = flow
                .data()
                .plan
                .and_then(|p| Plan::ALL.iter().position(|q| *q == p))
                .unwrap_or(0);
            let choice = Select::new()
                .with_prompt("Plan")
                .items(&labels)
                .default(current)
                .interact()?;
            flow.update(FieldUpdate::Plan(Some(Plan::ALL[choice])));
        }
        WizardStep::Confirm => {
            let data = flow.data();
            print_summary(data, ctx);
            let agree = Confirm::new()
                .with_prompt("I agree to the terms and conditions")
                .default(data.agree_terms)
                .interact()?;
            flow.update(FieldUpdate::AgreeTerms(agree));
        }
    }
    Ok(())
}

/// Entered values, in step order.
fn summary(data: &WizardData) -> Vec<(&'static str, String)> {
    let mut rows = vec![("name", data.name.clone()), ("email", data.email.clone())];
    if let Some(plan) = data.plan {
        rows.push(("plan", plan.display_name().to_string()));
    }
    rows
}

fn print_summary(data: &WizardData, ctx: &Context) {
    for (key, value) in summary(data) {
        ctx.output.kv(key, &value);
    }
}

fn show_errors(err: &WizardError, ctx: &Context) {
    match err.validation_errors() {
        Some(errors) => {
            for (field, error) in errors.iter() {
                ctx.output.warn(&format!("{}: {}", field.label(), error));
            }
        }
        None => ctx.output.warn(&err.to_string()),
    }
}

fn refusal(err: &WizardError, ctx: &Context) -> anyhow::Error {
    show_errors(err, ctx);
    anyhow!("{}", err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_rows() {
        let mut data = WizardData {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            plan: None,
            ..WizardData::default()
        };
        assert_eq!(
            summary(&data),
            vec![("name", "Ada".to_string()), ("email", "ada@example.com".to_string())]
        );

        data.plan = Some(Plan::Premium);
        assert_eq!(summary(&data)[2], ("plan", "Premium".to_string()));
    }
}
