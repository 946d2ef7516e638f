//! Mounting a component into a host container.

use std::any::TypeId;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::dom::Host;
use crate::element::Node;
use crate::error::RenderError;
use crate::hooks::{Hooks, Schedule};
use crate::renderer::render_element;

/// Settings for a [`Root`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootConfig {
    /// Id of the container element [`Root::mount`] looks up.
    pub root_id: String,
    /// Extra passes a single render may run because state changed while the
    /// component was rendering, before giving up with
    /// [`RenderError::RenderLoop`].
    pub max_rerenders: usize,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            root_id: "root".to_string(),
            max_rerenders: 25,
        }
    }
}

impl RootConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root_id(mut self, id: impl Into<String>) -> Self {
        self.root_id = id.into();
        self
    }

    pub fn max_rerenders(mut self, limit: usize) -> Self {
        self.max_rerenders = limit;
        self
    }
}

/// A function of its hook state that describes the UI.
///
/// Implemented for every `Fn(&Hooks) -> N` where `N: Into<Node>`, so plain
/// functions and closures are components. The component's type is its
/// identity: the hook slots of a root belong to the component type that
/// seeded them.
pub trait Component: 'static {
    fn render(&self, hooks: &Hooks) -> Node;
}

impl<F, N> Component for F
where
    F: Fn(&Hooks) -> N + 'static,
    N: Into<Node>,
{
    fn render(&self, hooks: &Hooks) -> Node {
        self(hooks).into()
    }
}

/// Mount `component`-rendered content into `container`.
///
/// The root owns the container's children from the first render on.
pub fn create_root<H: Host>(host: H, container: H::Node) -> Root<H> {
    Root::new(host, container, RootConfig::default())
}

/// A container element and the component rendered into it.
///
/// Cloning yields another handle to the same root. State setters only hold a
/// weak reference: once every handle is dropped they stop re-rendering.
pub struct Root<H: Host> {
    inner: Rc<RootInner<H>>,
}

struct RootInner<H: Host> {
    host: H,
    container: H::Node,
    config: RootConfig,
    hooks: Hooks,
    component: RefCell<Option<Rc<dyn Component>>>,
    render_count: Cell<usize>,
    last_error: RefCell<Option<RenderError>>,
}

impl<H: Host> Root<H> {
    pub fn new(host: H, container: H::Node, config: RootConfig) -> Self {
        let inner = Rc::new(RootInner {
            host,
            container,
            config,
            hooks: Hooks::new(),
            component: RefCell::new(None),
            render_count: Cell::new(0),
            last_error: RefCell::new(None),
        });
        let scheduler = Rc::downgrade(&inner);
        inner.hooks.attach(scheduler);
        Self { inner }
    }

    /// Find the element with id `config.root_id` and create a root on it.
    pub fn mount(host: H, config: RootConfig) -> Result<Self, RenderError> {
        let container = host
            .get_element_by_id(&config.root_id)
            .ok_or_else(|| RenderError::ContainerNotFound(config.root_id.clone()))?;
        log::debug!("mounting root on #{}", config.root_id);
        Ok(Self::new(host, container, config))
    }

    /// Make `component` the root's content and render it.
    ///
    /// State changes re-render the stored component until it is replaced by
    /// another call or the root is unmounted. Rendering a different component
    /// type starts from fresh hook state; rendering the same type again keeps
    /// it.
    pub fn render<C: Component>(&self, component: C) -> Result<(), RenderError> {
        if self.inner.hooks.adopt(TypeId::of::<C>()) {
            log::debug!("new component type; hook state discarded");
        }
        let previous = self
            .inner
            .component
            .borrow_mut()
            .replace(Rc::new(component));
        drop(previous);
        self.inner.run()
    }

    /// Remove the rendered content and forget the component and its state.
    pub fn unmount(&self) -> Result<(), RenderError> {
        let component = self.inner.component.borrow_mut().take();
        drop(component);
        self.inner.hooks.reset();
        self.inner.host.clear_children(&self.inner.container)?;
        log::debug!("root unmounted");
        Ok(())
    }

    /// Number of completed render passes.
    pub fn render_count(&self) -> usize {
        self.inner.render_count.get()
    }

    /// The error of the last failed render triggered by a state change, if
    /// it was not taken yet.
    pub fn take_error(&self) -> Option<RenderError> {
        self.inner.last_error.borrow_mut().take()
    }

    pub fn container(&self) -> &H::Node {
        &self.inner.container
    }

    pub fn host(&self) -> &H {
        &self.inner.host
    }

    pub fn config(&self) -> &RootConfig {
        &self.inner.config
    }
}

impl<H: Host> Clone for Root<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<H: Host> fmt::Debug for Root<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Root")
            .field("container", &self.inner.container)
            .field("config", &self.inner.config)
            .field("hooks", &self.inner.hooks)
            .field("render_count", &self.inner.render_count.get())
            .finish()
    }
}

impl<H: Host> RootInner<H> {
    /// Render, then keep rendering while the pass changed state.
    fn run(&self) -> Result<(), RenderError> {
        let result = self.run_passes();
        if result.is_err() {
            self.hooks.take_pending();
        }
        result
    }

    fn run_passes(&self) -> Result<(), RenderError> {
        let limit = self.config.max_rerenders;
        self.pass()?;
        let mut rerenders = 0;
        while self.hooks.take_pending() {
            if rerenders == limit {
                return Err(RenderError::RenderLoop { limit });
            }
            rerenders += 1;
            self.pass()?;
        }
        Ok(())
    }

    fn pass(&self) -> Result<(), RenderError> {
        let Some(component) = self.component.borrow().clone() else {
            log::debug!("render requested with no component mounted");
            return Ok(());
        };

        self.host.clear_children(&self.container)?;
        let tree = {
            let _rendering = self.hooks.begin_render();
            component.render(&self.hooks)
        };
        let dom = render_element(&self.host, &tree)?;
        if let Err(err) = self.host.append_child(&self.container, &dom) {
            self.host.discard(&dom);
            return Err(err.into());
        }

        let count = self.render_count.get() + 1;
        self.render_count.set(count);
        log::debug!("render pass {count} complete");
        Ok(())
    }
}

impl<H: Host> Schedule for RootInner<H> {
    fn schedule_render(&self) {
        if let Err(err) = self.run() {
            log::error!("re-render after state change failed: {err}");
            *self.last_error.borrow_mut() = Some(err);
        }
    }
}
