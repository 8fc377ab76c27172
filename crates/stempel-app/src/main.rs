// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stempel - stamp and sign scanned documents.
//
// Entry point. Initialises logging, opens the cache, and drives the signing
// service from the command line the way a GUI would from its widgets.

mod cli;
mod services;
mod state;

use std::process::ExitCode;

use clap::Parser;
use stempel_core::error::Result;
use stempel_core::human_errors::humanize_error;
use stempel_core::OverlayKind;
use stempel_document::write_composite;
use stempel_store::CacheStore;

use cli::{CacheAction, Cli, Commands, PlacementArgs};
use services::signing::SigningService;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            let human = humanize_error(&e);
            eprintln!("{}\n{}", human.message, human.suggestion);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let store = match &cli.cache_dir {
        Some(dir) => CacheStore::new(dir)?,
        None => CacheStore::open_default()?,
    };
    tracing::debug!(dir = %store.dir().display(), "cache opened");

    match cli.command {
        Commands::Sign { placement, output } => {
            let service = place(store, &placement)?;
            let path = service.export(output.as_deref())?;
            println!("Signed document saved as {}", path.display());
        }

        Commands::Preview { placement, output } => {
            let service = place(store, &placement)?;
            let preview = service.preview()?;
            write_composite(&preview, &output)?;
            println!("Preview saved as {}", output.display());
        }

        Commands::Settings {
            stamp_size,
            sign_size,
        } => {
            let mut service = SigningService::start(store);
            for (kind, input) in [
                (OverlayKind::Stamp, stamp_size),
                (OverlayKind::Signature, sign_size),
            ] {
                if let Some(input) = input {
                    service.apply_size_input(kind, &input)?;
                }
            }
            let settings = service.settings();
            println!("stamp diameter:  {} mm", settings.stamp_diameter_mm);
            println!("signature width: {} mm", settings.signature_width_mm);
        }

        Commands::Cache { action } => match action {
            CacheAction::Set { kind, file } => {
                let kind = OverlayKind::from(kind);
                let mut service = SigningService::start(store);
                service.load_source(kind, &file)?;
                println!("Cached {kind} from {}", file.display());
            }
            CacheAction::Clear { kind } => {
                let kind = OverlayKind::from(kind);
                if store.clear_cached_image(kind)? {
                    println!("Forgot cached {kind}");
                } else {
                    println!("No cached {kind}");
                }
            }
            CacheAction::Show => {
                let dir = store.dir().to_path_buf();
                let service = SigningService::start(store);
                println!("cache: {}", dir.display());
                println!("{}", service.state());
            }
        },
    }
    Ok(())
}

/// Load everything `args` names and place the requested overlays.
fn place(store: CacheStore, args: &PlacementArgs) -> Result<SigningService> {
    let mut service = SigningService::start(store).with_preview_width(args.preview_width);
    if let Some(viewport) = args.viewport {
        service.set_viewport(viewport);
    }
    service.load_document(&args.document)?;

    for (kind, file) in [
        (OverlayKind::Stamp, &args.stamp),
        (OverlayKind::Signature, &args.signature),
    ] {
        if let Some(file) = file {
            service.load_source(kind, file)?;
        }
    }

    for (kind, positions) in [
        (OverlayKind::Stamp, &args.stamp_at),
        (OverlayKind::Signature, &args.signature_at),
    ] {
        for &position in positions {
            let id = service.add_overlay(kind)?;
            let applied = service.move_overlay(id, position)?;
            if applied != position {
                tracing::warn!(%kind, x = applied.x, y = applied.y, "position clamped to edit area");
            }
        }
    }

    if service.placement().is_empty() {
        tracing::warn!("no overlays placed; output will match the document");
    }
    let state = service.state();
    if !state.can_sign() {
        tracing::info!(
            stamp = state.stamp_loaded,
            signature = state.signature_loaded,
            "not every source is loaded"
        );
    }
    Ok(service)
}
