//! Lazy content loading.
//!
//! The route table only records *which* module serves a route. This module
//! turns that into something navigable: a [`ModuleRegistry`] holding one
//! [`LazyModule`] per route, each wrapping a zero-argument factory. Nothing
//! is read until a route is navigated to.
//!
//! ```text
//! RouteTable ──► ModuleRegistry { "/css/flexbox" → LazyModule(factory) , ... }
//!                       │
//!          navigate("/css/flexbox")
//!                       ▼
//!                 PendingLoad ──await──► Arc<Content>
//!                       │
//!                  cancel() ──► LoadError::Cancelled
//! ```
//!
//! ## Sources
//!
//! Factories call into a [`ModuleSource`]. The production source is
//! [`FsModuleSource`], which reads `<root>/<module>.<ext>` and renders the
//! markdown with pulldown-cmark. Tests substitute their own source.
//!
//! ## Memoisation
//!
//! A successful load is kept per route and handed out again on the next
//! navigation. While a load is in flight, further navigations to the same
//! route join it instead of calling the factory again. Failed and cancelled
//! loads are forgotten, so the next navigation retries. Loads of different
//! routes are independent and may finish in any order.

use crate::resolve::ModulePath;
use crate::table::RouteTable;
use futures::FutureExt;
use futures::future::{AbortHandle, Abortable, Aborted, BoxFuture, Shared};
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd, html as md_html};
use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("No route registered for {0}")]
    UnknownRoute(String),
    #[error("Module {module} not found at {}", .path.display())]
    NotFound { module: String, path: PathBuf },
    #[error("IO error loading {module}: {message}")]
    Io { module: String, message: String },
    #[error("Load of {0} was cancelled")]
    Cancelled(String),
}

/// A loaded content module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub module: ModulePath,
    /// Text of the first level-one heading, if any.
    pub title: Option<String>,
    /// Rendered HTML body.
    pub html: String,
}

pub type LoadFuture = BoxFuture<'static, Result<Content, LoadError>>;

/// Where module content comes from.
pub trait ModuleSource: Send + Sync {
    /// Start loading a module. The returned future does the work when polled.
    fn load(&self, module: &ModulePath) -> LoadFuture;
}

/// Path of a module file under a content root.
pub fn module_file(root: &Path, module: &ModulePath, extension: &str) -> PathBuf {
    root.join(format!("{}.{extension}", module.as_str()))
}

/// Reads markdown modules from a content directory.
#[derive(Debug, Clone)]
pub struct FsModuleSource {
    root: PathBuf,
    extension: String,
}

impl FsModuleSource {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }
}

impl ModuleSource for FsModuleSource {
    fn load(&self, module: &ModulePath) -> LoadFuture {
        let path = module_file(&self.root, module, &self.extension);
        let module = module.clone();
        async move {
            let markdown = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => LoadError::NotFound {
                    module: module.to_string(),
                    path: path.clone(),
                },
                _ => LoadError::Io {
                    module: module.to_string(),
                    message: e.to_string(),
                },
            })?;
            Ok(render_markdown(module, &markdown))
        }
        .boxed()
    }
}

/// Render a markdown module into [`Content`].
pub fn render_markdown(module: ModulePath, markdown: &str) -> Content {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let events: Vec<Event<'_>> = Parser::new_ext(markdown, options).collect();
    let title = first_h1(&events);

    let mut html = String::new();
    md_html::push_html(&mut html, events.into_iter());

    Content {
        module,
        title,
        html,
    }
}

/// Plain text of the first H1, ATX or setext. Code blocks never match.
fn first_h1(events: &[Event<'_>]) -> Option<String> {
    let start = events.iter().position(|event| {
        matches!(
            event,
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            })
        )
    })?;

    let mut text = String::new();
    for event in &events[start + 1..] {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

type Factory = Arc<dyn Fn() -> LoadFuture + Send + Sync>;

/// Deferred binding from a route to its content.
#[derive(Clone)]
pub struct LazyModule {
    route: String,
    module: ModulePath,
    factory: Factory,
}

impl LazyModule {
    pub fn new(
        route: impl Into<String>,
        module: ModulePath,
        factory: impl Fn() -> LoadFuture + Send + Sync + 'static,
    ) -> Self {
        Self {
            route: route.into(),
            module,
            factory: Arc::new(factory),
        }
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn module(&self) -> &ModulePath {
        &self.module
    }

    /// Invoke the factory, bypassing any memoised result.
    pub fn load(&self) -> PendingLoad {
        let load = (self.factory)();
        PendingLoad::new(&self.route, async move { load.await.map(Arc::new) }.boxed())
    }
}

impl std::fmt::Debug for LazyModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyModule")
            .field("route", &self.route)
            .field("module", &self.module)
            .finish_non_exhaustive()
    }
}

type SharedLoad = Shared<BoxFuture<'static, Result<Arc<Content>, LoadError>>>;
type InFlight = Arc<Mutex<HashMap<String, SharedLoad>>>;

/// An in-flight load that can be awaited or cancelled.
///
/// Cancelling only detaches this caller. Other navigations that joined the
/// same load keep waiting on it.
pub struct PendingLoad {
    route: String,
    inner: Abortable<BoxFuture<'static, Result<Arc<Content>, LoadError>>>,
    handle: AbortHandle,
    in_flight: Option<InFlight>,
}

impl PendingLoad {
    fn new(route: &str, load: BoxFuture<'static, Result<Arc<Content>, LoadError>>) -> Self {
        let (handle, registration) = AbortHandle::new_pair();
        Self {
            route: route.to_string(),
            inner: Abortable::new(load, registration),
            handle,
            in_flight: None,
        }
    }

    fn ready(route: &str, result: Result<Arc<Content>, LoadError>) -> Self {
        Self::new(route, futures::future::ready(result).boxed())
    }

    /// Drop the route's in-flight entry when this load is cancelled.
    fn releasing(mut self, in_flight: InFlight) -> Self {
        self.in_flight = Some(in_flight);
        self
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    /// Handle that cancels this load from elsewhere.
    pub fn abort_handle(&self) -> AbortHandle {
        self.handle.clone()
    }

    pub fn cancel(&self) {
        self.handle.abort();
        self.release();
    }

    fn release(&self) {
        if let Some(in_flight) = &self.in_flight {
            lock(in_flight).remove(&self.route);
        }
    }
}

impl Future for PendingLoad {
    type Output = Result<Arc<Content>, LoadError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match Pin::new(&mut this.inner).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(Aborted)) => {
                debug!(route = %this.route, "load cancelled");
                this.release();
                Poll::Ready(Err(LoadError::Cancelled(this.route.clone())))
            }
        }
    }
}

/// Route → lazy module bindings, with memoised results.
pub struct ModuleRegistry {
    modules: HashMap<String, LazyModule>,
    loaded: Arc<Mutex<HashMap<String, Arc<Content>>>>,
    in_flight: InFlight,
}

impl ModuleRegistry {
    /// Bind every table entry to a factory over `source`. Nothing is loaded.
    pub fn new(table: &RouteTable, source: Arc<dyn ModuleSource>) -> Self {
        let modules = table
            .entries()
            .iter()
            .map(|entry| {
                let source = Arc::clone(&source);
                let module = entry.module.clone();
                let lazy = LazyModule::new(&entry.path, entry.module.clone(), move || {
                    source.load(&module)
                });
                (entry.path.clone(), lazy)
            })
            .collect();
        Self {
            modules,
            loaded: Arc::new(Mutex::new(HashMap::new())),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Binding for a route; a single trailing slash is ignored.
    pub fn get(&self, route: &str) -> Option<&LazyModule> {
        self.modules.get(crate::naming::normalize_route(route))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn is_loaded(&self, route: &str) -> bool {
        lock(&self.loaded).contains_key(crate::naming::normalize_route(route))
    }

    /// True while a load for the route has started and not yet settled.
    pub fn is_loading(&self, route: &str) -> bool {
        lock(&self.in_flight).contains_key(crate::naming::normalize_route(route))
    }

    /// Start, join, or reuse the load for a route.
    ///
    /// Unknown routes resolve to [`LoadError::UnknownRoute`].
    pub fn navigate(&self, route: &str) -> PendingLoad {
        let path = crate::naming::normalize_route(route);
        let Some(lazy) = self.modules.get(path) else {
            debug!(route, "navigation to unregistered route");
            return PendingLoad::ready(route, Err(LoadError::UnknownRoute(route.to_string())));
        };

        let mut in_flight = lock(&self.in_flight);
        if let Some(content) = lock(&self.loaded).get(path) {
            debug!(route = path, "module already loaded");
            return PendingLoad::ready(path, Ok(Arc::clone(content)));
        }

        let load = match in_flight.get(path) {
            Some(load) => {
                debug!(route = path, "joining in-flight load");
                load.clone()
            }
            None => {
                info!(route = path, module = %lazy.module, "loading module");
                let load = self.start_load(path, lazy);
                in_flight.insert(path.to_string(), load.clone());
                load
            }
        };
        drop(in_flight);

        PendingLoad::new(path, load.boxed()).releasing(Arc::clone(&self.in_flight))
    }

    fn start_load(&self, path: &str, lazy: &LazyModule) -> SharedLoad {
        let load = (lazy.factory)();
        let loaded = Arc::clone(&self.loaded);
        let in_flight = Arc::clone(&self.in_flight);
        let key = path.to_string();
        async move {
            let result = load.await.map(Arc::new);
            match &result {
                Ok(content) => {
                    lock(&loaded).insert(key.clone(), Arc::clone(content));
                }
                Err(e) => warn!(route = %key, error = %e, "module load failed"),
            }
            lock(&in_flight).remove(&key);
            result
        }
        .boxed()
        .shared()
    }
}

/// Lock a registry map, recovering the data if a holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
