//! Server-side rendering for Spin/WASI.

use leptos::{config::get_configuration, task::Executor as LeptosExecutor};
use leptos_wasi::{
    handler::HandlerError,
    prelude::{IncomingRequest, ResponseOutparam, WasiExecutor},
};
use wasi::exports::http::incoming_handler::Guest;
use wasi::http::proxy::export;

use crate::api::{HomeAction, LoadHome, LoadHomeClient, LoadProduct, SubmitProject};
use crate::app::{shell, App};

struct WaypointServer;

impl Guest for WaypointServer {
    fn handle(request: IncomingRequest, response_out: ResponseOutparam) {
        let executor = WasiExecutor::new(leptos_wasi::executor::Mode::Stalled);
        if let Err(e) = LeptosExecutor::init_local_custom_executor(executor.clone()) {
            eprintln!("Executor init error: {e:?}");
            return;
        }
        executor.run_until(async {
            if let Err(e) = handle_request(request, response_out).await {
                eprintln!("Request error: {e:?}");
            }
        })
    }
}

async fn handle_request(
    request: IncomingRequest,
    response_out: ResponseOutparam,
) -> Result<(), HandlerError> {
    use leptos_wasi::prelude::Handler;

    let leptos_options = match get_configuration(None) {
        Ok(conf) => conf.leptos_options,
        Err(e) => {
            eprintln!("Configuration error: {e:?}");
            return Ok(());
        }
    };

    Handler::build(request, response_out)?
        .with_server_fn::<LoadHome>()
        .with_server_fn::<LoadHomeClient>()
        .with_server_fn::<HomeAction>()
        .with_server_fn::<LoadProduct>()
        .with_server_fn::<SubmitProject>()
        .generate_routes(App)
        .handle_with_context(move || shell(leptos_options.clone()), || {})
        .await?;

    Ok(())
}

export!(WaypointServer with_types_in wasi);
