/* src/handler.rs */

use std::fmt;
use std::io::{self, Read, Write};
use std::sync::Arc;

use http::header::{CONTENT_TYPE, HOST, LOCATION, X_CONTENT_TYPE_OPTIONS};
use http::{HeaderValue, Method, Request, Response, StatusCode};

use crate::listing::{self, ListingContext};
use crate::path;
use crate::provider::{FileProvider, Handle};
use crate::render::Renderer;

const HTML_UTF8: &str = "text/html; charset=UTF-8";
const PLAIN_UTF8: &str = "text/plain; charset=utf-8";

/// Handler settings, fixed once the [`Handler`] is built.
pub struct Config {
	provider: Box<dyn FileProvider>,
	renderer: Box<dyn Renderer>,
	url_prefix: String,
	index_file_name: String,
}

impl Config {
	/// Serves `provider`, rendering listings with `renderer`.
	///
	/// Defaults: no URL prefix, index file `index.html`.
	#[must_use]
	pub fn new(provider: impl FileProvider + 'static, renderer: impl Renderer + 'static) -> Self {
		Self {
			provider: Box::new(provider),
			renderer: Box::new(renderer),
			url_prefix: String::new(),
			index_file_name: "index.html".to_owned(),
		}
	}

	/// Prefix stripped verbatim from every request path.
	#[must_use]
	pub fn url_prefix(mut self, prefix: &str) -> Self {
		prefix.clone_into(&mut self.url_prefix);
		self
	}

	/// File name probed for inside every listed directory.
	#[must_use]
	pub fn index_file_name(mut self, name: &str) -> Self {
		name.clone_into(&mut self.index_file_name);
		self
	}
}

impl fmt::Debug for Config {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Config")
			.field("url_prefix", &self.url_prefix)
			.field("index_file_name", &self.index_file_name)
			.finish_non_exhaustive()
	}
}

/// A response body.
pub enum Body {
	/// No body.
	Empty,
	/// A fully materialized body.
	Bytes(Vec<u8>),
	/// An open file, streamed when the body is written.
	File(Box<dyn Handle>),
}

impl Body {
	/// Copies the body into `out` and returns the number of bytes written.
	///
	/// The status line has already gone out by the time a file is streamed,
	/// so a failure midway is logged and the copy stops short.
	pub fn write_to<W: Write>(self, out: &mut W) -> u64 {
		let (written, result) = match self {
			Self::Empty => (0, Ok(())),
			Self::Bytes(bytes) => match out.write_all(&bytes) {
				Ok(()) => (bytes.len() as u64, Ok(())),
				Err(err) => (0, Err(err)),
			},
			Self::File(mut handle) => stream(&mut handle, out),
		};
		match result {
			Ok(()) => written,
			Err(err) => {
				log::warn!("response body cut short after {written} bytes: {err}");
				written
			}
		}
	}
}

fn stream<R: Read + ?Sized, W: Write>(reader: &mut R, out: &mut W) -> (u64, io::Result<()>) {
	let mut buf = [0u8; 8 * 1024];
	let mut written = 0;
	loop {
		let n = match reader.read(&mut buf) {
			Ok(0) => return (written, Ok(())),
			Ok(n) => n,
			Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
			Err(err) => return (written, Err(err)),
		};
		if let Err(err) = out.write_all(&buf[..n]) {
			return (written, Err(err));
		}
		written += n as u64;
	}
}

impl fmt::Debug for Body {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Empty => f.write_str("Empty"),
			Self::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
			Self::File(_) => f.write_str("File"),
		}
	}
}

/// Serves a directory tree over HTTP.
///
/// Files are streamed as-is, directories are rendered as listings. The
/// handler keeps no per-request state and clones share one [`Config`].
///
/// ```
/// use std::io::Write;
/// use dirlist::{Config, Error, Handler, ListingContext, provider::MemoryProvider};
///
/// let provider = MemoryProvider::new().file("/docs/a.txt", "alpha");
/// let renderer = |ctx: &mut ListingContext, out: &mut dyn Write| -> Result<(), Error> {
///     for entry in &ctx.entries {
///         writeln!(out, "{}", entry.name)?;
///     }
///     Ok(())
/// };
/// let handler = Handler::new(Config::new(provider, renderer));
///
/// let request = http::Request::get("/docs/").body(()).unwrap();
/// let response = handler.handle(&request);
/// assert_eq!(response.status(), http::StatusCode::OK);
/// ```
#[derive(Debug, Clone)]
pub struct Handler {
	config: Arc<Config>,
}

impl Handler {
	/// Freezes `config` into a handler.
	#[must_use]
	pub fn new(config: Config) -> Self {
		Self {
			config: Arc::new(config),
		}
	}

	/// Handles one request. The request body is never read.
	#[must_use]
	pub fn handle<B>(&self, request: &Request<B>) -> Response<Body> {
		let request_path = request.uri().path();
		let logical = match path::logical(request_path, &self.config.url_prefix) {
			Ok(logical) => logical,
			Err(err) => {
				log::info!("{} {request_path}: {err}", request.method());
				return not_found();
			}
		};

		log::info!("{} {logical}", request.method());

		if request.method() != Method::GET {
			return not_found();
		}

		let Ok(mut handle) = self.config.provider.open(&logical) else {
			return not_found();
		};

		let stat = match handle.stat() {
			Ok(stat) => stat,
			Err(err) => return internal_error(&err),
		};

		if !stat.is_dir {
			return Response::new(Body::File(handle));
		}

		if !logical.ends_with('/') {
			return redirect(&format!("{request_path}/"));
		}

		let mut entries = match handle.read_entries() {
			Ok(entries) => entries,
			Err(err) => return internal_error(&err),
		};
		drop(handle);
		listing::sort(&mut entries);

		let index_path = format!("{logical}{}", self.config.index_file_name);
		let index = self.config.provider.open(&index_path).ok();

		let mut context = ListingContext {
			entries,
			index,
			url: request.uri().clone(),
			host: host(request),
		};
		self.render(&mut context)
	}

	fn render(&self, context: &mut ListingContext) -> Response<Body> {
		let mut out: Vec<u8> = Vec::new();
		if let Err(err) = self.config.renderer.render(context, &mut out) {
			log::error!("failed to render listing for {}: {err}", context.url.path());
		}

		let mut response = Response::new(Body::Bytes(out));
		response
			.headers_mut()
			.insert(CONTENT_TYPE, HeaderValue::from_static(HTML_UTF8));
		response
	}
}

fn host<B>(request: &Request<B>) -> String {
	request
		.headers()
		.get(HOST)
		.and_then(|value| value.to_str().ok())
		.or_else(|| request.uri().authority().map(http::uri::Authority::as_str))
		.unwrap_or_default()
		.to_owned()
}

fn text(status: StatusCode, body: String) -> Response<Body> {
	let mut response = Response::new(Body::Bytes(body.into_bytes()));
	*response.status_mut() = status;
	let headers = response.headers_mut();
	headers.insert(CONTENT_TYPE, HeaderValue::from_static(PLAIN_UTF8));
	headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
	response
}

fn not_found() -> Response<Body> {
	text(StatusCode::NOT_FOUND, "404 page not found\n".to_owned())
}

fn internal_error(err: &io::Error) -> Response<Body> {
	text(StatusCode::INTERNAL_SERVER_ERROR, format!("{err}\n"))
}

fn redirect(location: &str) -> Response<Body> {
	let mut response = Response::new(Body::Empty);
	*response.status_mut() = StatusCode::MOVED_PERMANENTLY;
	match HeaderValue::from_str(location) {
		Ok(value) => {
			response.headers_mut().insert(LOCATION, value);
		}
		Err(err) => {
			log::error!("invalid redirect location {location:?}: {err}");
			return text(StatusCode::INTERNAL_SERVER_ERROR, format!("{err}\n"));
		}
	}
	response
}
