//! Mutation interception without touching the base type
//!
//! The original technique here is runtime subclassing: generate a subtype
//! whose setters shadow the base accessors. The portable rendition is
//! structural composition: [`Intercepted`] owns the base instance and is the
//! only way to reach its accessors, so every assignment deterministically
//! runs the before/mutate/after sequence. [`Proxy`] is the owning facade
//! pairing one wrapped instance with one [`CallbackRegistry`].
//!
//! Ownership mirrors the described model: the proxy is the sole owner of
//! both the wrapped object and the registry; the wrapped object keeps a
//! non-owning back-reference (`Weak`) to the registry it fires into.

pub mod compiler;
pub mod registry;

pub use compiler::{PropertyOp, ProxyCompiler, ProxyShape};
pub use registry::{CallbackRegistry, SetObserver};

use crate::descriptor::{Getter, Reflect, TypeDescriptor};
use crate::error::{Error, Result};
use crate::value::FieldValue;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;

/// A live instance of the compiled interception shape: the wrapped object.
///
/// Getters delegate to the base accessors unchanged. The setter reads the
/// current value through the base getter, fires the before-set observers,
/// applies the base setter exactly once, then fires the after-set observers.
/// No assignment path skips the sequence.
pub struct Intercepted<T> {
    inner: T,
    shape: Arc<ProxyShape<T>>,
    registry: Weak<RefCell<CallbackRegistry>>,
}

impl<T> Intercepted<T> {
    /// Read a property through its base getter
    pub fn get(&self, selector: Getter<T>) -> Result<FieldValue> {
        let op = self.shape.resolve(selector)?;
        Ok((op.get)(&self.inner))
    }

    /// Assign a property, running the full interception sequence.
    ///
    /// A before-set observer failure prevents the mutation; an after-set
    /// failure surfaces after the mutation has already taken effect.
    pub fn set(&mut self, selector: Getter<T>, value: impl Into<FieldValue>) -> Result<()> {
        let op = self.shape.resolve(selector)?;
        let registry = self
            .registry
            .upgrade()
            .ok_or_else(|| Error::internal("callback registry dropped before wrapped object"))?;

        let old = (op.get)(&self.inner);
        let new = value.into();

        registry.borrow().fire_before_set(op.name, &old, &new)?;
        (op.set)(&mut self.inner, new.clone())?;
        registry.borrow().fire_after_set(op.name, &old, &new)?;
        Ok(())
    }

    /// Borrow the wrapped base instance
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// The compiled shape this instance was created from
    pub fn shape(&self) -> &ProxyShape<T> {
        &self.shape
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Intercepted<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Intercepted")
            .field("type_name", &self.shape.type_name())
            .field("inner", &self.inner)
            .finish()
    }
}

/// Top-level handle pairing one wrapped instance with its callback registry
pub struct Proxy<T> {
    object: Intercepted<T>,
    registry: Rc<RefCell<CallbackRegistry>>,
}

impl<T: Reflect> Proxy<T> {
    /// Compile a shape for `T` and wrap a fresh instance.
    ///
    /// For repeated proxy creation over the same base type, prefer
    /// [`Specializer::proxy_for`](crate::engine::Specializer::proxy_for),
    /// which reuses the cached shape.
    pub fn new() -> Result<Self> {
        let descriptor = TypeDescriptor::<T>::extract()?;
        let shape = Arc::new(ProxyCompiler::compile(&descriptor)?);
        Ok(Self::from_shape(shape))
    }
}

impl<T> Proxy<T> {
    /// Wrap a fresh instance of an already-compiled shape
    pub fn from_shape(shape: Arc<ProxyShape<T>>) -> Self {
        let registry = Rc::new(RefCell::new(CallbackRegistry::new()));
        let object = Intercepted {
            inner: shape.construct(),
            shape,
            registry: Rc::downgrade(&registry),
        };
        Self { object, registry }
    }

    /// Register a before-set observer on the property the selector denotes.
    ///
    /// Fails with `InvalidPropertySelector` when the selector is not a
    /// property getter of the base type.
    pub fn before_set(
        &mut self,
        selector: Getter<T>,
        callback: impl Fn(&FieldValue, &FieldValue) -> Result<()> + 'static,
    ) -> Result<()> {
        let name = self.object.shape.resolve(selector)?.name;
        self.registry
            .borrow_mut()
            .register_before_set(name, Box::new(callback));
        Ok(())
    }

    /// Register an after-set observer on the property the selector denotes
    pub fn after_set(
        &mut self,
        selector: Getter<T>,
        callback: impl Fn(&FieldValue, &FieldValue) -> Result<()> + 'static,
    ) -> Result<()> {
        let name = self.object.shape.resolve(selector)?.name;
        self.registry
            .borrow_mut()
            .register_after_set(name, Box::new(callback));
        Ok(())
    }

    /// Read a property of the wrapped object
    pub fn get(&self, selector: Getter<T>) -> Result<FieldValue> {
        self.object.get(selector)
    }

    /// Assign a property of the wrapped object through the interception
    /// sequence
    pub fn set(&mut self, selector: Getter<T>, value: impl Into<FieldValue>) -> Result<()> {
        self.object.set(selector, value)
    }

    /// Borrow the wrapped object
    pub fn object(&self) -> &Intercepted<T> {
        &self.object
    }

    /// Mutably borrow the wrapped object
    pub fn object_mut(&mut self) -> &mut Intercepted<T> {
        &mut self.object
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Proxy<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Proxy")
            .field("object", &self.object)
            .field("registry", &*self.registry.borrow())
            .finish()
    }
}
