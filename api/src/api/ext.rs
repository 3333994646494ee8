use std::sync::{Arc, Weak};

use hyper::StatusCode;
use utils::http::ext::OptionExt;
use utils::http::router::ext::RequestExt;

use super::error::Result;
use crate::global::GlobalState;
use crate::validation::RequestPayload;

pub trait RequestGlobalExt {
	fn get_global(&self) -> Result<Arc<GlobalState>>;
}

impl<B> RequestGlobalExt for hyper::Request<B> {
	fn get_global(&self) -> Result<Arc<GlobalState>> {
		self.data::<Weak<GlobalState>>()
			.and_then(Weak::upgrade)
			.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to upgrade global state"))
	}
}

pub trait RequestPayloadExt {
	/// Takes the sanitized payload left on the request by the validation
	/// gate.
	fn take_payload(&mut self) -> Result<RequestPayload>;
}

impl<B> RequestPayloadExt for hyper::Request<B> {
	fn take_payload(&mut self) -> Result<RequestPayload> {
		self.extensions_mut()
			.remove::<RequestPayload>()
			.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "request payload was not validated"))
	}
}
