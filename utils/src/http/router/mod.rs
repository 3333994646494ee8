use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use self::builder::{RouteHandler, RouterBuilder};
use self::error::RouterError;
use self::middleware::{Middleware, NextFn, NextFut};
use self::types::{RouteInfo, RouteParams};

pub mod builder;
pub mod error;
pub mod ext;
pub mod middleware;
pub mod types;

/// A compiled route table.
///
/// Routes are keyed by `/{METHOD}/{path}` so a single path tree serves every
/// method. Routes registered with [`RouterBuilder::any`] live under `/*/`
/// and are only tried once the method specific lookup fails.
pub struct Router<I, O, E> {
	routes: Vec<RouteHandler<I, O, E>>,
	middlewares: Vec<Arc<dyn Middleware<I, O, E>>>,
	tree: path_tree::PathTree<RouteInfo>,
}

impl<I: Send + 'static, O: Send + 'static, E: Send + 'static> Router<I, O, E> {
	pub fn builder() -> RouterBuilder<I, O, E> {
		RouterBuilder::new()
	}

	pub async fn handle(&self, mut req: hyper::Request<I>) -> Result<hyper::Response<O>, RouterError<E>> {
		let exact = format!("/{}{}", req.method().as_str(), req.uri().path());
		let wildcard = format!("/*{}", req.uri().path());
		let (info, path) = self
			.tree
			.find(&exact)
			.or_else(|| self.tree.find(&wildcard))
			.ok_or(RouterError::NotFound)?;

		let params = path.params_iter().map(|(k, v)| (k.to_owned(), v.to_owned())).collect();
		req.extensions_mut().insert(RouteParams(params));

		let handler = self.routes[info.route].clone();
		let next: NextFn<I, O, E> = Box::new(move |req| Box::pin(async move { handler(req).await }) as NextFut<O, E>);

		let chain = info
			.middleware
			.iter()
			.rev()
			.map(|idx| self.middlewares[*idx].clone())
			.fold(next, |next, middleware| {
				Box::new(move |req| Box::pin(async move { middleware.handle(req, next).await }) as NextFut<O, E>)
			});

		chain(req).await.map_err(RouterError::Unhandled)
	}
}

impl<I, O, E> Debug for Router<I, O, E> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router").field("tree", &self.tree).finish()
	}
}
