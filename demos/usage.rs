/* demos/usage.rs */

use std::io::Write;

use dirlist::provider::DirProvider;
use dirlist::render::TeraRenderer;
use dirlist::{Config, Handler};

fn main() {
	let root = std::env::current_dir().expect("failed to get current directory");
	let provider = DirProvider::new(&root).expect("failed to open root");
	let renderer = TeraRenderer::new().expect("failed to build template");
	let handler = Handler::new(Config::new(provider, renderer).url_prefix("/files"));

	for uri in ["/files/src", "/files/src/", "/files/Cargo.toml", "/files/missing"] {
		let request = http::Request::get(uri)
			.header(http::header::HOST, "localhost")
			.body(())
			.expect("failed to build request");
		let response = handler.handle(&request);

		println!("GET {uri} -> {}", response.status());
		for (name, value) in response.headers() {
			println!("  {name}: {value:?}");
		}

		let mut stdout = std::io::stdout().lock();
		let written = response.into_body().write_to(&mut stdout);
		let _ = writeln!(stdout);
		println!("  ({written} bytes)");
	}
}
