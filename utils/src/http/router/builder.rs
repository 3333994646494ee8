use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::middleware::{Middleware, NextFn};
use super::types::RouteInfo;
use super::Router;

pub(crate) type RouteHandler<I, O, E> = Arc<
	dyn Fn(hyper::Request<I>) -> Pin<Box<dyn Future<Output = Result<hyper::Response<O>, E>> + Send + 'static>>
		+ Send
		+ Sync
		+ 'static,
>;

enum RouterItem<I, O, E> {
	Route {
		method: Option<hyper::Method>,
		handler: RouteHandler<I, O, E>,
	},
	Scope(RouterBuilder<I, O, E>),
}

impl<I, O, E> Debug for RouterItem<I, O, E> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			RouterItem::Route { method, .. } => f.debug_struct("Route").field("method", method).finish(),
			RouterItem::Scope(builder) => write!(f, "Scope({builder:?})"),
		}
	}
}

/// Middlewares are ordered by kind before they are attached, so data is
/// always provided before the error handler, and the error handler always
/// wraps the generic middlewares of the same scope.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
enum MiddlewareKind {
	Data,
	Error,
	Generic,
}

pub struct RouterBuilder<I, O, E> {
	tree: Vec<(&'static str, RouterItem<I, O, E>)>,
	middlewares: Vec<(Arc<dyn Middleware<I, O, E>>, MiddlewareKind)>,
}

impl<I, O, E> Debug for RouterBuilder<I, O, E> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouterBuilder").field("tree", &self.tree).finish()
	}
}

impl<I: Send + 'static, O: Send + 'static, E: Send + 'static> Default for RouterBuilder<I, O, E> {
	fn default() -> Self {
		Self::new()
	}
}

macro_rules! method_route {
	($($name:ident => $method:ident),* $(,)?) => {
		$(
			pub fn $name<F: Future<Output = Result<hyper::Response<O>, E>> + Send + 'static>(
				self,
				path: &'static str,
				handler: impl Fn(hyper::Request<I>) -> F + Send + Sync + 'static,
			) -> Self {
				self.add_route(Some(hyper::Method::$method), path, handler)
			}
		)*
	};
}

impl<I: Send + 'static, O: Send + 'static, E: Send + 'static> RouterBuilder<I, O, E> {
	pub fn new() -> Self {
		Self {
			tree: Vec::new(),
			middlewares: Vec::new(),
		}
	}

	pub fn middleware(mut self, middleware: impl Middleware<I, O, E>) -> Self {
		self.middlewares.push((Arc::new(middleware), MiddlewareKind::Generic));
		self
	}

	/// Inserts a clone of `data` into the extensions of every request routed
	/// through this scope.
	pub fn data<T: Clone + Send + Sync + 'static>(mut self, data: T) -> Self {
		self.middlewares.push((
			Arc::new(move |mut req: hyper::Request<I>, next: NextFn<I, O, E>| {
				req.extensions_mut().insert(data.clone());
				next(req)
			}),
			MiddlewareKind::Data,
		));

		self
	}

	/// Converts errors returned by any inner middleware or route into a
	/// response.
	pub fn error_handler<F: Future<Output = hyper::Response<O>> + Send + 'static>(
		mut self,
		handler: impl Fn(hyper::Request<()>, E) -> F + Send + Sync + 'static,
	) -> Self {
		let handler = Arc::new(handler);
		self.middlewares.push((
			Arc::new(move |req: hyper::Request<I>, next: NextFn<I, O, E>| {
				let handler = handler.clone();
				async move {
					let (parts, body) = req.into_parts();

					match next(hyper::Request::from_parts(parts.clone(), body)).await {
						Ok(res) => Ok(res),
						Err(err) => Ok(handler(hyper::Request::from_parts(parts, ()), err).await),
					}
				}
			}),
			MiddlewareKind::Error,
		));

		self
	}

	method_route! {
		get => GET,
		post => POST,
		put => PUT,
		patch => PATCH,
		delete => DELETE,
	}

	pub fn any<F: Future<Output = Result<hyper::Response<O>, E>> + Send + 'static>(
		self,
		path: &'static str,
		handler: impl Fn(hyper::Request<I>) -> F + Send + Sync + 'static,
	) -> Self {
		self.add_route(None, path, handler)
	}

	pub fn add_route<F: Future<Output = Result<hyper::Response<O>, E>> + Send + 'static>(
		mut self,
		method: Option<hyper::Method>,
		path: &'static str,
		handler: impl Fn(hyper::Request<I>) -> F + Send + Sync + 'static,
	) -> Self {
		self.tree.push((
			path,
			RouterItem::Route {
				method,
				handler: Arc::new(move |req| Box::pin(handler(req))),
			},
		));
		self
	}

	/// Mounts another builder under `path`. The scope inherits every
	/// middleware of its parents and adds its own inside them.
	pub fn scope(mut self, path: &'static str, router: RouterBuilder<I, O, E>) -> Self {
		self.tree.push((path, RouterItem::Scope(router)));
		self
	}

	fn join(parent: &str, path: &str) -> String {
		let parent = parent.trim_matches('/');
		let path = path.trim_matches('/');

		match (parent.is_empty(), path.is_empty()) {
			(true, _) => path.to_owned(),
			(_, true) => parent.to_owned(),
			_ => format!("{parent}/{path}"),
		}
	}

	fn build_scoped(mut self, parent_path: &str, target: &mut Router<I, O, E>, inherited: &[usize]) {
		self.middlewares.sort_by_key(|(_, kind)| *kind);

		let middleware = inherited
			.iter()
			.copied()
			.chain(self.middlewares.into_iter().map(|(handler, _)| {
				target.middlewares.push(handler);
				target.middlewares.len() - 1
			}))
			.collect::<Vec<_>>();

		for (path, item) in self.tree.drain(..) {
			match item {
				RouterItem::Route { method, handler } => {
					target.routes.push(handler);

					let method = method.as_ref().map_or("*", |method| method.as_str());
					let full_path = format!("/{method}/{}", Self::join(parent_path, path));

					tracing::debug!(parent_path, path, full_path = %full_path, "adding route");

					let _ = target.tree.insert(
						&full_path,
						RouteInfo {
							route: target.routes.len() - 1,
							middleware: middleware.clone(),
						},
					);
				}
				RouterItem::Scope(router) => {
					router.build_scoped(&Self::join(parent_path, path), target, &middleware);
				}
			}
		}
	}

	pub fn build(self) -> Router<I, O, E> {
		let mut router = Router {
			routes: Vec::new(),
			middlewares: Vec::new(),
			tree: path_tree::PathTree::new(),
		};

		self.build_scoped("", &mut router, &[]);

		router
	}
}
