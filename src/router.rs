//! Router binding an endpoint type to an application's model and messages.

use std::fmt;

use crate::config::RouterConfig;
use crate::endpoint::EndpointCodec;
use crate::error::InvalidRouter;
use crate::routable::Routable;
use crate::value::Value;

/// Navigation operations consumed by a UI or server dispatcher.
///
/// Implemented by [`Router`]; navigation layers take this trait so that
/// tests can substitute their own routing.
pub trait NavigationRouter<Model, Msg> {
    /// Returns the path for the current model.
    fn get_route(&self, model: &Model) -> String;

    /// Returns the message for a path, or `None` if nothing matches.
    fn set_route(&self, path: &str) -> Option<Msg>;
}

type GetEndpoint<Model, E> = Box<dyn Fn(&Model) -> E + Send + Sync>;
type MakeMessage<E, Msg> = Box<dyn Fn(E) -> Msg + Send + Sync>;
type SeedPageModel<E> = Box<dyn Fn(&mut E) + Send + Sync>;

/// A router for the endpoint type `E`.
///
/// # Examples
///
/// ```
/// use endpoint_router::{Routable, Router, Schema, Shape, Value, VariantShape};
///
/// #[derive(Debug, Clone, PartialEq)]
/// enum Page {
///     Home,
///     Search { query: String },
/// }
///
/// impl Routable for Page {
///     fn describe(schema: &mut Schema) -> Shape {
///         Shape::Union(vec![
///             VariantShape::new("Home").path("/"),
///             VariantShape::new("Search")
///                 .path("/search/{query}")
///                 .field(schema.field::<String>("query")),
///         ])
///     }
///
///     fn to_value(&self) -> Value {
///         match self {
///             Self::Home => Value::variant(0, vec![]),
///             Self::Search { query } => Value::variant(1, vec![query.to_value()]),
///         }
///     }
///
///     fn from_value(value: Value) -> Option<Self> {
///         let (tag, mut fields) = value.into_variant()?;
///         match tag {
///             0 => Some(Self::Home),
///             1 => Some(Self::Search { query: fields.read()? }),
///             _ => None,
///         }
///     }
/// }
///
/// struct Model {
///     page: Page,
/// }
///
/// enum Msg {
///     Goto(Page),
/// }
///
/// let router = Router::infer(Msg::Goto, |model: &Model| model.page.clone()).unwrap();
///
/// let model = Model { page: Page::Search { query: "rust lang".into() } };
/// assert_eq!(router.get_route(&model), "/search/rust%20lang");
///
/// let Some(Msg::Goto(page)) = router.set_route("/search/rust%20lang") else {
///     panic!("no match");
/// };
/// assert_eq!(page, Page::Search { query: "rust lang".into() });
/// assert!(router.set_route("/missing").is_none());
/// ```
pub struct Router<E, Model, Msg> {
    codec: EndpointCodec<E>,
    get_endpoint: GetEndpoint<Model, E>,
    make_message: MakeMessage<E, Msg>,
    seed_page_model: Option<SeedPageModel<E>>,
    not_found: Option<Value>,
}

impl<E: Routable, Model, Msg> Router<E, Model, Msg> {
    /// Builds a router from the shared compiled codec of `E`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRouter` if `E` is not a valid endpoint type.
    pub fn infer<M, G>(make_message: M, get_endpoint: G) -> Result<Self, InvalidRouter>
    where
        M: Fn(E) -> Msg + Send + Sync + 'static,
        G: Fn(&Model) -> E + Send + Sync + 'static,
    {
        Ok(Self::from_codec(
            EndpointCodec::shared()?,
            make_message,
            get_endpoint,
        ))
    }

    /// Builds a router whose parsed endpoints have their page models seeded
    /// by `default_page_model` before a message is made from them.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRouter` if `E` is not a valid endpoint type.
    pub fn infer_with_model<M, G, P>(
        make_message: M,
        get_endpoint: G,
        default_page_model: P,
    ) -> Result<Self, InvalidRouter>
    where
        M: Fn(E) -> Msg + Send + Sync + 'static,
        G: Fn(&Model) -> E + Send + Sync + 'static,
        P: Fn(&mut E) + Send + Sync + 'static,
    {
        let mut router = Self::infer(make_message, get_endpoint)?;
        router.seed_page_model = Some(Box::new(default_page_model));
        Ok(router)
    }

    /// Builds a router around an existing codec.
    #[must_use]
    pub fn from_codec<M, G>(codec: EndpointCodec<E>, make_message: M, get_endpoint: G) -> Self
    where
        M: Fn(E) -> Msg + Send + Sync + 'static,
        G: Fn(&Model) -> E + Send + Sync + 'static,
    {
        Self {
            codec,
            get_endpoint: Box::new(get_endpoint),
            make_message: Box::new(make_message),
            seed_page_model: None,
            not_found: None,
        }
    }

    /// Replaces the path-string configuration.
    #[must_use]
    pub fn with_config(mut self, config: RouterConfig) -> Self {
        self.codec = self.codec.with_config(config);
        self
    }

    /// Sets the endpoint that [`set_route`](Self::set_route) falls back to
    /// when no variant matches.
    #[must_use]
    pub fn with_not_found(mut self, endpoint: &E) -> Self {
        self.not_found = Some(endpoint.to_value());
        self
    }

    /// Returns the underlying codec.
    #[must_use]
    pub const fn codec(&self) -> &EndpointCodec<E> {
        &self.codec
    }

    /// Returns the path of the endpoint the model is at.
    #[must_use]
    pub fn get_route(&self, model: &Model) -> String {
        self.link(&(self.get_endpoint)(model))
    }

    /// Parses a path into a message.
    ///
    /// Returns `None` if no variant matches and no not-found endpoint is set.
    #[must_use]
    pub fn set_route(&self, path: &str) -> Option<Msg> {
        let mut endpoint = self
            .codec
            .parse(path)
            .or_else(|| self.not_found.clone().and_then(E::from_value))?;
        if let Some(seed) = &self.seed_page_model {
            seed(&mut endpoint);
        }
        Some((self.make_message)(endpoint))
    }

    /// Returns the path of an endpoint.
    #[must_use]
    pub fn link(&self, endpoint: &E) -> String {
        self.codec.write(endpoint)
    }
}

impl<E: Routable, Model, Msg> NavigationRouter<Model, Msg> for Router<E, Model, Msg> {
    fn get_route(&self, model: &Model) -> String {
        Self::get_route(self, model)
    }

    fn set_route(&self, path: &str) -> Option<Msg> {
        Self::set_route(self, path)
    }
}

impl<E, Model, Msg> fmt::Debug for Router<E, Model, Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("codec", &self.codec)
            .field("seeds_page_model", &self.seed_page_model.is_some())
            .field("not_found", &self.not_found)
            .finish_non_exhaustive()
    }
}
