// Copyright 2023 The Factnet Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Main for the factnet node binary: command-line parsing, logging setup
//! and the server lifecycle. A fatal startup error (bind failure, seed
//! unreachable or malformed) exits non-zero; ctrl-c shuts down cleanly.

#[macro_use]
extern crate log;

use std::process;
use std::sync::mpsc;

use clap::{App, Arg};

use factnet_servers as servers;
use factnet_util as util;
use util::{init_logger, LogLevel, LoggingConfig};

fn main() {
	let args = App::new("factnet")
		.version("0.1.0")
		.about("Minimal peer-to-peer replicated fact ledger node.")
		.arg(
			Arg::with_name("ipeer")
				.long("ipeer")
				.value_name("HOST:PORT")
				.help("HTTP address of the peer to join the network through; empty to start as root")
				.takes_value(true),
		)
		.arg(
			Arg::with_name("hport")
				.long("hport")
				.value_name("PORT")
				.help("HTTP API listen port")
				.takes_value(true),
		)
		.arg(
			Arg::with_name("wsport")
				.long("wsport")
				.value_name("PORT")
				.help("WebSocket peer listen port")
				.takes_value(true),
		)
		.arg(
			Arg::with_name("verbose")
				.short("v")
				.long("verbose")
				.help("Enable verbose output"),
		)
		.get_matches();

	let mut config = servers::ServerConfig::default();
	if let Some(seed) = args.value_of("ipeer") {
		if !seed.is_empty() {
			config.seed = Some(seed.to_owned());
		}
	}
	if let Some(port) = args.value_of("hport") {
		config.http_port = parse_port("hport", port);
	}
	if let Some(port) = args.value_of("wsport") {
		config.ws_port = parse_port("wsport", port);
	}

	let mut logging = LoggingConfig::default();
	if args.is_present("verbose") {
		logging.stdout_log_level = LogLevel::Debug;
	}
	init_logger(Some(logging));

	info!(
		"starting factnet node, http port {}, ws port {}, seed {:?}",
		config.http_port, config.ws_port, config.seed
	);

	let mut server = match servers::Server::start(config) {
		Ok(server) => server,
		Err(e) => {
			error!("failed to start server: {}", e);
			process::exit(1);
		}
	};

	// Park until interrupted, then shut down cleanly.
	let (tx, rx) = mpsc::channel();
	if let Err(e) = ctrlc::set_handler(move || {
		let _ = tx.send(());
	}) {
		error!("failed to install signal handler: {}", e);
		process::exit(1);
	}
	let _ = rx.recv();
	warn!("shutting down");
	server.stop();
}

fn parse_port(flag: &str, value: &str) -> u16 {
	match value.parse() {
		Ok(port) => port,
		Err(e) => {
			eprintln!("invalid {} value {:?}: {}", flag, value, e);
			process::exit(1);
		}
	}
}
