use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{anyhow, Context};
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use serde_json::{json, Value};
use tera::Tera;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use vef_forms::{FieldRegistry, FieldValue, FormItem, RawValue};

use crate::browser;
use crate::config::AppConfig;
use crate::console::{ConsoleEvent, ConsoleSession, TASK_COMPLETE_EVENT};

const INDEX_TEMPLATE_NAME: &str = "index.html";
const INDEX_TEMPLATE: &str = include_str!("../web/index.html");

type SubmitHandler = Arc<dyn Fn(&SubmitContext<'_>) -> anyhow::Result<()> + Send + Sync>;

/// What a submit handler sees: the submitted values and the console.
pub struct SubmitContext<'a> {
    registry: &'a FieldRegistry,
    console: &'a ConsoleSession,
}

impl<'a> SubmitContext<'a> {
    pub fn new(registry: &'a FieldRegistry, console: &'a ConsoleSession) -> Self {
        Self { registry, console }
    }

    pub fn get_value(&self, key: &str) -> vef_forms::Result<Option<FieldValue>> {
        self.registry.get_value(key)
    }

    pub fn get_value_or(
        &self,
        key: &str,
        fallback: FieldValue,
    ) -> vef_forms::Result<Option<FieldValue>> {
        self.registry.get_value_or(key, fallback)
    }

    pub fn registry(&self) -> &FieldRegistry {
        self.registry
    }

    /// Print a line in the window's console pane.
    pub fn console(&self, message: impl Into<String>) {
        self.console.console(message);
    }

    pub fn send(&self, event: ConsoleEvent) {
        self.console.send(event);
    }
}

struct AppState {
    config: AppConfig,
    registry: Mutex<FieldRegistry>,
    console: Arc<ConsoleSession>,
    on_submit: Option<SubmitHandler>,
    templates: Tera,
}

/// A single-window form application.
///
/// ```no_run
/// use vef_forms::Input;
/// use vef_webservice::{AppConfig, VefApp};
///
/// # async fn run() -> anyhow::Result<()> {
/// let mut app = VefApp::new(AppConfig::new("hello"));
/// app.add(Input::new("name").label("Name"))?;
/// app.on_submit(|ctx| {
///     if let Some(name) = ctx.get_value("name")? {
///         ctx.console(format!("Hello {}.", name));
///     }
///     Ok(())
/// });
/// app.run().await
/// # }
/// ```
pub struct VefApp {
    config: AppConfig,
    registry: FieldRegistry,
    console: Arc<ConsoleSession>,
    on_submit: Option<SubmitHandler>,
}

impl VefApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            registry: FieldRegistry::with_options(config.form.clone()),
            console: Arc::new(ConsoleSession::new(config.debug)),
            config,
            on_submit: None,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Append an item to the form.
    pub fn add(&mut self, item: impl Into<FormItem>) -> vef_forms::Result<()> {
        self.registry.register(item)
    }

    /// Run `handler` after every submission, on the blocking thread pool.
    /// An error is shown to the user instead of the completion notice.
    pub fn on_submit<F>(&mut self, handler: F)
    where
        F: Fn(&SubmitContext<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.on_submit = Some(Arc::new(handler));
    }

    /// Handle for pushing console messages from outside a submit handler.
    pub fn console(&self) -> Arc<ConsoleSession> {
        Arc::clone(&self.console)
    }

    pub fn router(self) -> anyhow::Result<Router> {
        let templates = load_templates(&self.config.web_dir())?;
        let assets = ServeDir::new(self.config.web_dir().join("assets"));
        let state = Arc::new(AppState {
            config: self.config,
            registry: Mutex::new(self.registry),
            console: self.console,
            on_submit: self.on_submit,
            templates,
        });

        Ok(Router::new()
            .route("/", get(index))
            .route("/init", get(init))
            // uploads are local files of arbitrary size
            .route("/submit", post(submit).layer(DefaultBodyLimit::disable()))
            .route("/console", get(console_socket))
            .nest_service("/assets", assets)
            .layer(ServiceBuilder::new().layer(CatchPanicLayer::new()))
            .with_state(state))
    }

    /// Serve on `127.0.0.1:<port>`, open the window, and stop when the window
    /// closes (outside debug mode) or on Ctrl-C.
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = SocketAddr::from(([127, 0, 0, 1], self.config.port));
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;
        let url = format!("http://{}", addr);
        info!("'{}' listening on {}", self.config.title, url);

        if self.config.open_browser {
            if let Err(e) = browser::launch(&self.config, &url) {
                warn!("Could not open the application window: {}", e);
            }
        }

        let console = self.console();
        let router = self.router()?;
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = console.closed() => info!("Console closed, shutting down"),
                    _ = tokio::signal::ctrl_c() => info!("Interrupted, shutting down"),
                }
            })
            .await
            .context("server error")?;
        info!("Server stopped");
        Ok(())
    }
}

/// The built-in page, replaced by `<web_dir>/index.html` when present.
fn load_templates(web_dir: &Path) -> anyhow::Result<Tera> {
    let mut tera = Tera::default();
    let custom = web_dir.join(INDEX_TEMPLATE_NAME);
    if custom.is_file() {
        debug!("Using index template {:?}", custom);
        tera.add_template_file(&custom, Some(INDEX_TEMPLATE_NAME))
            .with_context(|| format!("failed to load template {:?}", custom))?;
    } else {
        tera.add_raw_template(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)
            .context("failed to load built-in index template")?;
    }
    Ok(tera)
}

async fn index(State(state): State<Arc<AppState>>) -> Response {
    let mut context = tera::Context::new();
    context.insert("title", &state.config.title);
    context.insert("lang", &state.config.lang);
    match state.templates.render(INDEX_TEMPLATE_NAME, &context) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Failed to render index page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to render page").into_response()
        }
    }
}

async fn init(State(state): State<Arc<AppState>>) -> Json<Value> {
    let schema = state
        .registry
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .schema();
    let (width, height) = state.config.size;
    Json(json!({
        "form": schema,
        "debug": state.config.debug,
        "window": {
            "width": width,
            "height": height,
            "minWidth": width,
            "minHeight": height,
        },
        "messages": state.config.messages,
        "lang": state.config.lang,
    }))
}

async fn submit(State(state): State<Arc<AppState>>, multipart: Multipart) -> Json<Value> {
    let outcome = match receive_fields(&state.config.upload_dir(), multipart).await {
        Ok(fields) => {
            let task_state = Arc::clone(&state);
            tokio::task::spawn_blocking(move || apply_submission(&task_state, fields))
                .await
                .unwrap_or_else(|e| Err(anyhow!("submit handler failed: {}", e)))
        }
        Err(e) => Err(e),
    };

    match outcome {
        Ok(()) => {
            debug!("Submission complete");
            state
                .console
                .send(ConsoleEvent::new(TASK_COMPLETE_EVENT, "complete"));
            Json(json!({ "ok": true }))
        }
        Err(e) => {
            let message = format!("{:#}", e);
            warn!("Submission failed: {}", message);
            state.console.console(message.clone());
            Json(json!({ "ok": false, "error": message }))
        }
    }
}

/// Read every part of a submission, saving files as they arrive.
async fn receive_fields(
    upload_dir: &Path,
    mut multipart: Multipart,
) -> anyhow::Result<Vec<(String, RawValue)>> {
    let mut fields = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .context("malformed form submission")?
    {
        let Some(key) = field.name().map(str::to_string) else {
            continue;
        };
        match field.file_name().map(str::to_string) {
            // a file input left empty
            Some(file_name) if file_name.is_empty() => continue,
            Some(file_name) => {
                let data = field
                    .bytes()
                    .await
                    .with_context(|| format!("failed to receive file for '{}'", key))?;
                let path = save_upload(upload_dir, &file_name, &data).await?;
                fields.push((key, RawValue::File(path)));
            }
            None => {
                let text = field
                    .text()
                    .await
                    .with_context(|| format!("failed to receive value for '{}'", key))?;
                fields.push((key, RawValue::Text(text)));
            }
        }
    }
    Ok(fields)
}

/// Write an upload to `<upload_dir>/<file name>`, dropping any directory part
/// the client sent.
async fn save_upload(upload_dir: &Path, file_name: &str, data: &[u8]) -> anyhow::Result<PathBuf> {
    let name = Path::new(file_name)
        .file_name()
        .ok_or_else(|| anyhow!("invalid upload file name '{}'", file_name))?;
    tokio::fs::create_dir_all(upload_dir)
        .await
        .with_context(|| format!("failed to create {:?}", upload_dir))?;
    let path = upload_dir.join(name);
    tokio::fs::write(&path, data)
        .await
        .with_context(|| format!("failed to save {:?}", path))?;
    debug!("Saved upload to {:?}", path);
    Ok(path)
}

fn apply_submission(state: &AppState, fields: Vec<(String, RawValue)>) -> anyhow::Result<()> {
    let mut registry = state
        .registry
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    registry.clear_values();
    for (key, raw) in fields {
        registry.set_raw_value(&key, raw);
    }

    match &state.on_submit {
        Some(handler) => handler(&SubmitContext::new(&registry, &state.console)),
        None => {
            debug!("No submit handler registered");
            Ok(())
        }
    }
}

async fn console_socket(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    let console = Arc::clone(&state.console);
    ws.on_upgrade(move |socket| serve_console(socket, console))
}

async fn serve_console(socket: WebSocket, console: Arc<ConsoleSession>) {
    let (id, mut events) = console.attach();
    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            event = events.recv() => {
                // None: another window took over the console
                let Some(event) = event else { break };
                let frame = match event.to_frame() {
                    Ok(frame) => frame,
                    Err(e) => {
                        error!("Failed to encode console event: {}", e);
                        continue;
                    }
                };
                if let Err(e) = sender.send(Message::Text(frame)).await {
                    error!("Failed to send console message: {}", e);
                    break;
                }
            }
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Text(text))) => debug!("Console client {} says: {}", id, text),
                Some(Ok(Message::Close(_))) | None => {
                    info!("Console client {} closed the connection", id);
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    error!("Console socket error: {}", e);
                    break;
                }
            },
        }
    }

    console.detach(id);
}
