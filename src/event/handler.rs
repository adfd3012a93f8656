use thiserror::Error;

/// Failure reported by a fallible handler.
///
/// Wraps whatever error the handler produced so that it can travel back
/// to the caller of [`Event::invoke`](super::Event::invoke).
#[derive(Debug, Error)]
#[error(transparent)]
pub struct HandlerError(Box<dyn std::error::Error + Send + Sync>);

impl HandlerError {
    pub fn new<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>
    {
        Self(err.into())
    }

    pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync> {
        self.0
    }

    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static
    {
        self.0.downcast_ref::<E>()
    }
}

pub type HandlerResult = Result<(), HandlerError>;

pub (crate) type Handler<S, A> = Box<
    dyn Fn(Option<&S>, &A) -> HandlerResult + Send + Sync
>;

pub (crate) fn infallible<S, A, F>(f: F) -> Handler<S, A>
where
    S: 'static,
    A: 'static,
    F: Fn(Option<&S>, &A) + Send + Sync + 'static
{
    Box::new(move |sender, args| {
        f(sender, args);
        Ok(())
    })
}

pub (crate) fn fallible<S, A, F>(f: F) -> Handler<S, A>
where
    S: 'static,
    A: 'static,
    F: Fn(Option<&S>, &A) -> HandlerResult + Send + Sync + 'static
{
    Box::new(f)
}
