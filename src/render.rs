/* src/render.rs */

use std::io::Write;

use crate::error::Error;
use crate::listing::ListingContext;

/// Turns a [`ListingContext`] into response bytes.
///
/// Output may be written incrementally; on error, whatever was already
/// written is still sent.
pub trait Renderer: Send + Sync {
	/// Renders `context` into `out`.
	fn render(&self, context: &mut ListingContext, out: &mut dyn Write) -> Result<(), Error>;
}

impl<F> Renderer for F
where
	F: Fn(&mut ListingContext, &mut dyn Write) -> Result<(), Error> + Send + Sync,
{
	fn render(&self, context: &mut ListingContext, out: &mut dyn Write) -> Result<(), Error> {
		self(context, out)
	}
}

#[cfg(feature = "tera")]
pub use self::tera_renderer::TeraRenderer;

#[cfg(feature = "tera")]
mod tera_renderer {
	use std::io::Write;

	use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
	use serde::Serialize;
	use tera::{Context, Tera};

	use super::Renderer;
	use crate::error::Error;
	use crate::listing::{Entry, ListingContext};

	// Bytes that would end or change the meaning of a relative path segment.
	const SEGMENT: &AsciiSet = &CONTROLS
		.add(b' ')
		.add(b'"')
		.add(b'#')
		.add(b'%')
		.add(b'/')
		.add(b':')
		.add(b'<')
		.add(b'>')
		.add(b'?')
		.add(b'\\')
		.add(b'`')
		.add(b'{')
		.add(b'}');

	const DEFAULT_NAME: &str = "listing.html";

	const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Index of {{ path }}</title>
</head>
<body>
<h1>Index of {{ path }}</h1>
{% if index %}<section class="index">{{ index | safe }}</section>
{% endif %}<ul>
{% for entry in entries %}<li><a href="{{ entry.href }}{% if entry.is_dir %}/{% endif %}">{{ entry.name }}{% if entry.is_dir %}/{% endif %}</a>{% if entry.size %} {{ entry.size }}{% endif %}</li>
{% endfor %}</ul>
</body>
</html>
"#;

	/// Renders listings with a [`Tera`] template.
	///
	/// Template variables: `entries` (each with `name`, `is_dir`, `size`,
	/// `modified`, and `href`, the percent-encoded name), `url`, `path`, `host`, and `index`, the index file's text,
	/// only set when the directory has one. Templates whose name ends in
	/// `.html` are autoescaped.
	///
	/// ```
	/// let renderer = dirlist::render::TeraRenderer::new();
	/// assert!(renderer.is_ok());
	/// ```
	#[derive(Debug)]
	pub struct TeraRenderer {
		tera: Tera,
		name: String,
	}

	impl TeraRenderer {
		/// Uses the built-in listing template.
		pub fn new() -> Result<Self, Error> {
			Self::from_template(DEFAULT_NAME, DEFAULT_TEMPLATE)
		}

		/// Uses `source` as the listing template, registered as `name`.
		pub fn from_template(name: &str, source: &str) -> Result<Self, Error> {
			let mut tera = Tera::default();
			tera.add_raw_template(name, source)?;
			Ok(Self {
				tera,
				name: name.to_owned(),
			})
		}
	}

	#[derive(Serialize)]
	struct EntryView<'a> {
		#[serde(flatten)]
		entry: &'a Entry,
		href: String,
	}

	impl<'a> From<&'a Entry> for EntryView<'a> {
		fn from(entry: &'a Entry) -> Self {
			Self {
				entry,
				href: utf8_percent_encode(&entry.name, SEGMENT).to_string(),
			}
		}
	}

	impl Renderer for TeraRenderer {
		fn render(&self, context: &mut ListingContext, out: &mut dyn Write) -> Result<(), Error> {
			let mut vars = Context::new();
			if let Some(index) = context.index_contents()? {
				vars.insert("index", &index);
			}
			let entries: Vec<EntryView<'_>> = context.entries.iter().map(EntryView::from).collect();
			vars.insert("entries", &entries);
			vars.insert("url", &context.url.to_string());
			vars.insert("path", context.url.path());
			vars.insert("host", &context.host);
			self.tera.render_to(&self.name, &vars, out)?;
			Ok(())
		}
	}
}
