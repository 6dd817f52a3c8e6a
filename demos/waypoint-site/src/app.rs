//! Application shell, route tree and pages.

use leptos::prelude::*;
use leptos::server_fn::error::ServerFnError;
use leptos_meta::*;
use waypoint_core::{
    meta_tags, site_routes, ErrorReport, MetaTag, RouteFailure, SiteSection, HOME, PRODUCT,
};
use waypoint_router::{
    path, use_location, use_params_map, Outlet, ParentRoute, Route, Router, Routes, A,
};

use crate::api::{
    load_home, load_home_client, load_product, HomeAction, HomeView, PostView, SubmitProject,
};
use crate::wizard::{StepConfirm, StepDetails, StepPlan, WizardLayout};

// ============================================================================
// Shell (SSR entry point)
// ============================================================================

#[cfg(feature = "ssr")]
pub fn shell(options: leptos::config::LeptosOptions) -> impl IntoView {
    use leptos::hydration::{AutoReload, HydrationScripts};

    let links = waypoint_core::links(&SiteSection::default());

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                {links
                    .into_iter()
                    .map(|link| view! {
                        <link rel=link.rel href=link.href crossorigin=link.crossorigin/>
                    })
                    .collect_view()}
                <AutoReload options=options.clone() />
                <HydrationScripts options=options.clone() root=""/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Text a route shows while its loader is pending.
fn hydrate_fallback(id: &str) -> String {
    site_routes()
        .ok()
        .and_then(|routes| routes.get(id).and_then(|r| r.meta.hydrate_fallback.clone()))
        .unwrap_or_else(|| "Loading...".to_string())
}

// ============================================================================
// App Component
// ============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let head = meta_tags(&SiteSection::default())
        .into_iter()
        .map(|tag| match tag {
            MetaTag::Title(text) => view! { <Title text=text/> }.into_any(),
            MetaTag::Property { property, content } => {
                view! { <Meta property=property content=content/> }.into_any()
            }
            MetaTag::Name { name, content } => view! { <Meta name=name content=content/> }.into_any(),
        })
        .collect_view();

    let fallback = || view! { <NotFound/> }.into_view();

    view! {
        <Stylesheet id="leptos" href="/pkg/waypoint_site.css"/>
        {head}

        <Router>
            <Header/>
            <main>
                <Routes fallback>
                    <Route path=path!("") view=HomePage/>
                    <Route path=path!("/about") view=AboutPage/>
                    <Route path=path!("/login") view=LoginPage/>
                    <ParentRoute path=path!("/setting") view=SettingLayout>
                        <Route path=path!("") view=SettingHome/>
                        <Route path=path!("product") view=SettingProduct/>
                        <Route path=path!("user") view=SettingUser/>
                    </ParentRoute>
                    <ParentRoute path=path!("") view=MarketingLayout>
                        <Route path=path!("contact") view=ContactPage/>
                    </ParentRoute>
                    <ParentRoute path=path!("/projects") view=|| view! { <Outlet/> }>
                        <Route path=path!("") view=ProjectsHome/>
                        <ParentRoute path=path!("") view=ProjectLayout>
                            <Route path=path!(":pid") view=ProjectPage/>
                            <Route path=path!(":pid/edit") view=EditProjectPage/>
                        </ParentRoute>
                    </ParentRoute>
                    <Route path=path!("/teams/:teamId") view=TeamPage/>
                    <Route path=path!("/:lang?/categories") view=CategoriesPage/>
                    <Route path=path!("/files/*rest") view=FilesPage/>
                    <ParentRoute path=path!("/wizard") view=WizardLayout>
                        <Route path=path!("") view=StepDetails/>
                        <Route path=path!("step-2") view=StepPlan/>
                        <Route path=path!("step-3") view=StepConfirm/>
                    </ParentRoute>
                    <Route path=path!("/product/:pid") view=ProductPage/>
                    <Route path=path!("/projectDetail/:pid") view=ProjectDetailPage/>
                </Routes>
            </main>
        </Router>
    }
}

// ============================================================================
// Layout Components
// ============================================================================

#[component]
fn Header() -> impl IntoView {
    view! {
        <header>
            <nav>
                <A href="/">"Home"</A>
                <A href="/about">"About"</A>
                <A href="/setting">"Settings"</A>
                <A href="/projects">"Projects"</A>
                <A href="/product/1">"Product"</A>
                <A href="/projectDetail/1">"Project form"</A>
                <A href="/wizard">"Wizard"</A>
            </nav>
        </header>
    }
}

#[component]
fn SettingLayout() -> impl IntoView {
    view! {
        <h1>"Settings"</h1>
        <nav>
            <A href="/setting">"Overview"</A>
            <A href="/setting/product">"Product"</A>
            <A href="/setting/user">"User"</A>
        </nav>
        <Outlet/>
    }
}

#[component]
fn MarketingLayout() -> impl IntoView {
    view! {
        <nav>
            <A href="/">"Home"</A>" | "
            <A href="/about">"About"</A>" | "
            <A href="/contact">"Contact"</A>
        </nav>
        <Outlet/>
    }
}

#[component]
fn ProjectLayout() -> impl IntoView {
    view! {
        <section class="project-layout">
            <A href="/projects">"All projects"</A>
            <Outlet/>
        </section>
    }
}

// ============================================================================
// Home
// ============================================================================

#[component]
fn HomePage() -> impl IntoView {
    let server_data = Resource::new(|| (), |_| load_home());
    let client_data = Resource::new(|| (), |_| load_home_client());
    let action = ServerAction::<HomeAction>::new();
    let fallback = hydrate_fallback(HOME);

    view! {
        <h1>"Home"</h1>
        <Suspense fallback=move || view! { <p>{fallback.clone()}</p> }>
            {move || server_data.get().map(home_message)}
            {move || client_data.get().map(home_message)}
        </Suspense>
        <RouteMatches/>
        <ActionForm action=action>
            <input type="hidden" name="client" value="false"/>
            <button type="submit">"Server action"</button>
        </ActionForm>
        <ActionForm action=action>
            <input type="hidden" name="client" value="true"/>
            <button type="submit">"Client action"</button>
        </ActionForm>
        {move || action.value().get().map(|result| match result {
            Ok(ok) => view! { <p>"ok: " {ok.to_string()}</p> }.into_any(),
            Err(e) => view! { <BoundaryView failure=server_failure(&e)/> }.into_any(),
        })}
    }
}

fn home_message(result: Result<HomeView, ServerFnError>) -> AnyView {
    match result {
        Ok(data) => view! { <p>{data.message}</p> }.into_any(),
        Err(e) => view! { <BoundaryView failure=server_failure(&e)/> }.into_any(),
    }
}

/// Every route in the current match chain with its `handle`.
#[component]
fn RouteMatches() -> impl IntoView {
    let location = use_location();

    move || {
        let path = location.pathname.get();
        site_routes().ok().and_then(|routes| routes.resolve(&path)).map(|matched| {
            view! {
                <ul class="matches">
                    {matched
                        .matches
                        .into_iter()
                        .map(|m| {
                            let handle = m.handle.map(|h| h.to_string()).unwrap_or_default();
                            view! { <li><code>{m.id}</code>" "{handle}</li> }
                        })
                        .collect_view()}
                </ul>
            }
        })
    }
}

// ============================================================================
// Pages
// ============================================================================

#[component]
fn AboutPage() -> impl IntoView {
    view! { <h1>"About"</h1> }
}

#[component]
fn LoginPage() -> impl IntoView {
    view! {
        <h1>"Login"</h1>
        <form>
            <input type="text" name="username" placeholder="Username"/>
            <input type="password" name="password" placeholder="Password"/>
            <button type="submit">"Sign in"</button>
        </form>
    }
}

#[component]
fn SettingHome() -> impl IntoView {
    view! { <p>"Pick a settings page."</p> }
}

#[component]
fn SettingProduct() -> impl IntoView {
    view! { <h2>"Product settings"</h2> }
}

#[component]
fn SettingUser() -> impl IntoView {
    view! { <h2>"User settings"</h2> }
}

#[component]
fn ContactPage() -> impl IntoView {
    view! { <h1>"Contact"</h1> }
}

#[component]
fn ProjectsHome() -> impl IntoView {
    view! {
        <h1>"Projects"</h1>
        <ul>
            <li><A href="/projects/1">"Project 1"</A></li>
            <li><A href="/projects/2/edit">"Edit project 2"</A></li>
        </ul>
    }
}

fn param(name: &'static str) -> impl Fn() -> String + Copy {
    let params = use_params_map();
    move || params.get().get(name).unwrap_or_default()
}

#[component]
fn ProjectPage() -> impl IntoView {
    let pid = param("pid");
    view! {
        <h1>"Project"</h1>
        <p>"Project id: " {pid}</p>
    }
}

#[component]
fn EditProjectPage() -> impl IntoView {
    let pid = param("pid");
    view! {
        <h1>"Edit project"</h1>
        <p>"Project id: " {pid}</p>
    }
}

#[component]
fn TeamPage() -> impl IntoView {
    let team_id = param("teamId");
    view! { <p>"Team id: " {team_id}</p> }
}

#[component]
fn CategoriesPage() -> impl IntoView {
    let lang = param("lang");
    view! {
        <h1>"Categories"</h1>
        <p>"Language: " {move || {
            let lang = lang();
            if lang.is_empty() { "default".to_string() } else { lang }
        }}</p>
    }
}

#[component]
fn FilesPage() -> impl IntoView {
    let rest = param("rest");
    view! {
        <h1>"Files"</h1>
        <p>"Path: " {rest}</p>
    }
}

// ============================================================================
// Product
// ============================================================================

#[component]
fn ProductPage() -> impl IntoView {
    let pid = param("pid");
    // The client loader hydrates: it runs on first render as well.
    let product = Resource::new(pid, |pid| load_product(pid, true));
    let fallback = hydrate_fallback(PRODUCT);

    view! {
        <nav>
            <A href="/product/2">"Product 2"</A>
            <A href="/product/3">"Product 3"</A>
        </nav>
        <Suspense fallback=move || view! { <p>{fallback.clone()}</p> }>
            {move || product.get().map(|result| match result {
                Ok(post) => view! { <PostDetail post=post/> }.into_any(),
                Err(e) => view! { <BoundaryView failure=server_failure(&e)/> }.into_any(),
            })}
        </Suspense>
    }
}

#[component]
fn PostDetail(post: PostView) -> impl IntoView {
    view! {
        <article>
            <h1>"ID: " {post.id}</h1>
            <h2>"Title: " {post.title}</h2>
            {(!post.loaded_by.is_empty()).then(|| view! { <p>"Loaded by: " {post.loaded_by}</p> })}
            <p>{post.body}</p>
        </article>
    }
}

// ============================================================================
// Project detail (form submission)
// ============================================================================

#[component]
fn ProjectDetailPage() -> impl IntoView {
    let submit = ServerAction::<SubmitProject>::new();
    let pending = submit.pending();
    let value = submit.value();

    view! {
        <h1>"Project detail"</h1>
        <ActionForm action=submit>
            <input type="number" name="pid"/>
            <button type="submit" disabled=move || pending.get()>
                {move || if pending.get() { "Saving..." } else { "Submit" }}
            </button>
        </ActionForm>
        {move || value.get().map(|result| match result {
            Ok(post) => view! { <p>{post.title} " updated"</p> }.into_any(),
            Err(e) => view! { <BoundaryView failure=server_failure(&e)/> }.into_any(),
        })}
    }
}

// ============================================================================
// Error boundaries
// ============================================================================

fn server_failure(err: &ServerFnError) -> RouteFailure {
    let message = match err {
        ServerFnError::ServerError(message) => message.clone(),
        other => other.to_string(),
    };
    RouteFailure::Error {
        message,
        stack: None,
    }
}

/// Route-level boundary: status line and data, or the error message.
#[component]
fn BoundaryView(failure: RouteFailure) -> impl IntoView {
    let report = ErrorReport::detailed(&failure);
    view! {
        <div class="error">
            <h1>{report.heading}</h1>
            <p>{report.details}</p>
            {report.stack.map(|stack| view! {
                <p>"The stack trace is:"</p>
                <pre>{stack}</pre>
            })}
        </div>
    }
}

/// 404 page, rendered the way the root boundary reports a missing route.
#[component]
fn NotFound() -> impl IntoView {
    #[cfg(feature = "ssr")]
    {
        if let Some(resp) = use_context::<leptos_wasi::response::ResponseOptions>() {
            resp.set_status(leptos_wasi::prelude::StatusCode::NOT_FOUND);
        }
    }

    let report = ErrorReport::root(&RouteFailure::not_found(), cfg!(debug_assertions));
    view! {
        <div style="text-align: center; padding: 4rem;">
            <h1>{report.heading}</h1>
            <p>{report.details}</p>
            <A href="/">"Back to Home"</A>
        </div>
    }
}
