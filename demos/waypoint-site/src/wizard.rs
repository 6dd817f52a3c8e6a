//! The signup wizard: a layout route holding the flow and three step routes.

use leptos::prelude::*;
use waypoint_core::WIZARD_BASE;
use waypoint_router::{use_location, use_navigate, NavigateOptions, Outlet};
use waypoint_wizard::{Field, FieldUpdate, Plan, Submission, WizardError, WizardFlow, WizardStep};

/// Shared wizard state, provided by [`WizardLayout`].
#[derive(Clone, Copy)]
struct WizardState {
    flow: RwSignal<WizardFlow>,
    submitted: RwSignal<Option<Submission>>,
}

fn use_wizard() -> WizardState {
    expect_context::<WizardState>()
}

/// Apply a transition and navigate to wherever it lands.
fn transition(
    state: WizardState,
    navigate: &impl Fn(&str, NavigateOptions),
    apply: impl FnOnce(&mut WizardFlow) -> Result<WizardStep, WizardError>,
) {
    if let Some(Ok(step)) = state.flow.try_update(apply) {
        navigate(&step.href(WIZARD_BASE), Default::default());
    }
}

#[component]
pub fn WizardLayout() -> impl IntoView {
    let location = use_location();
    let flow = RwSignal::new(WizardFlow::at_path(&location.pathname.get_untracked()));
    let submitted = RwSignal::new(None::<Submission>);
    provide_context(WizardState { flow, submitted });

    // Back/forward changes the path without a transition.
    Effect::new(move |_| {
        let path = location.pathname.get();
        if flow.with_untracked(|f| WizardStep::from_path(&path) != f.step()) {
            flow.update(|f| {
                f.sync_to_path(&path);
            });
        }
    });

    view! {
        <div class="wizard">
            <h1>"Wizard example"</h1>
            {move || submitted.get().map(|s| view! {
                <p class="notice">{s.acknowledgment()}</p>
            })}
            <ProgressIndicator/>
            <Outlet/>
        </div>
    }
}

#[component]
fn ProgressIndicator() -> impl IntoView {
    let state = use_wizard();
    let progress = Memo::new(move |_| state.flow.with(|f| f.progress()));

    view! {
        <div class="progress">
            <div class="progress-line" style:width=move || progress.with(|p| p.width_css())></div>
            {move || progress.with(|p| p.markers.iter().map(|marker| view! {
                <div class=marker.state.class()>
                    <span class="dot">{marker.glyph()}</span>
                    <span>{marker.label()}</span>
                </div>
            }).collect::<Vec<_>>())}
        </div>
    }
}

#[component]
fn FieldMessage(field: Field) -> impl IntoView {
    let state = use_wizard();
    move || {
        state
            .flow
            .with(|f| f.errors().message(field))
            .map(|message| view! { <p class="error">{message}</p> })
    }
}

#[component]
pub fn StepDetails() -> impl IntoView {
    let state = use_wizard();
    let flow = state.flow;
    let navigate = use_navigate();

    view! {
        <h2>{WizardStep::Details.title()}</h2>
        <div class="field">
            <label for="name">{Field::Name.label()}</label>
            <input
                id="name"
                type="text"
                placeholder="Enter your name"
                prop:value=move || flow.with(|f| f.data().name.clone())
                on:input=move |ev| flow.update(|f| f.update(FieldUpdate::Name(event_target_value(&ev))))
            />
            <FieldMessage field=Field::Name/>
        </div>
        <div class="field">
            <label for="email">{Field::Email.label()}</label>
            <input
                id="email"
                type="email"
                placeholder="Enter your email address"
                prop:value=move || flow.with(|f| f.data().email.clone())
                on:input=move |ev| flow.update(|f| f.update(FieldUpdate::Email(event_target_value(&ev))))
            />
            <FieldMessage field=Field::Email/>
        </div>
        <div class="actions">
            <span></span>
            <button on:click=move |_| transition(state, &navigate, WizardFlow::advance)>"Next"</button>
        </div>
    }
}

#[component]
pub fn StepPlan() -> impl IntoView {
    let state = use_wizard();
    let flow = state.flow;
    let navigate = use_navigate();
    let back = {
        let navigate = navigate.clone();
        move |_| transition(state, &navigate, WizardFlow::go_back)
    };
    let next = move |_| transition(state, &navigate, WizardFlow::advance);

    let options = Plan::ALL
        .into_iter()
        .map(|plan| {
            view! {
                <label>
                    <input
                        type="radio"
                        name="plan"
                        value=plan.as_str()
                        prop:checked=move || flow.with(|f| f.data().plan == Some(plan))
                        on:change=move |_| flow.update(|f| f.update(FieldUpdate::Plan(Some(plan))))
                    />
                    {format!(" {} ({})", plan.display_name(), plan.price_label())}
                </label>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <h2>{WizardStep::Plan.title()}</h2>
        <div class="field">
            <label>"Available plans"</label>
            {options}
            <FieldMessage field=Field::Plan/>
        </div>
        <div class="actions">
            <button on:click=back>"Back"</button>
            <button on:click=next>"Next"</button>
        </div>
    }
}

#[component]
pub fn StepConfirm() -> impl IntoView {
    let state = use_wizard();
    let flow = state.flow;
    let navigate = use_navigate();
    let back = {
        let navigate = navigate.clone();
        move |_| transition(state, &navigate, WizardFlow::go_back)
    };
    let on_submit = move |_| {
        if let Some(Ok(submission)) = flow.try_update(|f| f.submit()) {
            state.submitted.set(Some(submission));
            navigate(WIZARD_BASE, Default::default());
        }
    };

    let plan = move || {
        flow.with(|f| f.data().plan.map(|p| p.display_name()).unwrap_or("-"))
    };

    view! {
        <h2>{WizardStep::Confirm.title()}</h2>
        <dl>
            <dt>"Name"</dt>
            <dd>{move || flow.with(|f| f.data().name.clone())}</dd>
            <dt>"Email"</dt>
            <dd>{move || flow.with(|f| f.data().email.clone())}</dd>
            <dt>"Plan"</dt>
            <dd>{plan}</dd>
        </dl>
        <div class="field">
            <label>
                <input
                    type="checkbox"
                    prop:checked=move || flow.with(|f| f.data().agree_terms)
                    on:change=move |ev| flow.update(|f| f.update(FieldUpdate::AgreeTerms(event_target_checked(&ev))))
                />
                " I agree to the terms and conditions"
            </label>
            <FieldMessage field=Field::AgreeTerms/>
        </div>
        <div class="actions">
            <button on:click=back>"Back"</button>
            <button on:click=on_submit>"Submit"</button>
        </div>
    }
}
