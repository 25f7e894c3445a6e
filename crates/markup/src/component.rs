//! Component capability
//!
//! A component is anything that turns props into a child tree. Function
//! components are plain closures; class components are constructed from
//! their props on every expansion and then rendered.

use crate::error::ComponentError;
use crate::slot::ChildTree;
use crate::types::Props;
use std::marker::PhantomData;

/// Render capability shared by function and class components
pub trait Component: Send + Sync {
    fn render(&self, props: &Props) -> Result<ChildTree, ComponentError>;
}

impl<F> Component for F
where
    F: Fn(&Props) -> Result<ChildTree, ComponentError> + Send + Sync,
{
    fn render(&self, props: &Props) -> Result<ChildTree, ComponentError> {
        self(props)
    }
}

/// Stateful component, instantiated with its props before rendering
pub trait ClassComponent: Sized {
    fn new(props: Props) -> Self;

    fn render(&self) -> Result<ChildTree, ComponentError>;
}

/// Adapts a `ClassComponent` type into a `Component`
pub(crate) struct ClassFactory<C> {
    _marker: PhantomData<fn() -> C>,
}

impl<C> ClassFactory<C> {
    pub(crate) fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<C: ClassComponent> Component for ClassFactory<C> {
    fn render(&self, props: &Props) -> Result<ChildTree, ComponentError> {
        let instance = C::new(props.clone());
        ClassComponent::render(&instance)
    }
}
