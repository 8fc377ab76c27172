// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use stempel_core::{OverlayKind, Point, Size};

/// Largest preview the edit area is expected to show.
const MAX_PREVIEW_WIDTH: i64 = 4096;

#[derive(Parser)]
#[command(name = "stempel", about = "Stamp and sign scanned documents", version)]
pub struct Cli {
    /// Directory for cached stamp, signature and settings
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Place overlays and write the signed document
    Sign {
        #[command(flatten)]
        placement: PlacementArgs,

        /// Output file (default: next to the document with a "signed" suffix)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Place overlays and write the annotated on-screen preview
    Preview {
        #[command(flatten)]
        placement: PlacementArgs,

        /// Output image file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show or change the overlay sizes
    Settings {
        /// Stamp diameter in millimetres
        #[arg(long)]
        stamp_size: Option<String>,

        /// Signature width in millimetres
        #[arg(long)]
        sign_size: Option<String>,
    },

    /// Manage the cached stamp and signature images
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
pub enum CacheAction {
    /// Remember an image as the stamp or signature
    Set {
        #[arg(value_enum)]
        kind: KindArg,
        file: PathBuf,
    },
    /// Forget the cached image
    Clear {
        #[arg(value_enum)]
        kind: KindArg,
    },
    /// Show what is cached and where
    Show,
}

/// Document, sources and overlay positions shared by `sign` and `preview`.
#[derive(Args)]
pub struct PlacementArgs {
    /// Document image (PNG, JPEG, BMP)
    pub document: PathBuf,

    /// Stamp image (default: cached stamp)
    #[arg(long)]
    pub stamp: Option<PathBuf>,

    /// Signature image (default: cached signature)
    #[arg(long)]
    pub signature: Option<PathBuf>,

    /// Place a stamp with its top-left corner at X,Y in the edit area
    #[arg(long = "stamp-at", value_parser = parse_point)]
    pub stamp_at: Vec<Point>,

    /// Place a signature with its top-left corner at X,Y in the edit area
    #[arg(long = "signature-at", value_parser = parse_point)]
    pub signature_at: Vec<Point>,

    /// Edit area size as WxH (default: the preview size)
    #[arg(long, value_parser = parse_size)]
    pub viewport: Option<Size>,

    /// Preview width in pixels
    #[arg(
        long,
        default_value_t = stempel_document::DEFAULT_PREVIEW_WIDTH,
        value_parser = clap::value_parser!(u32).range(1..=MAX_PREVIEW_WIDTH)
    )]
    pub preview_width: u32,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Stamp,
    Signature,
}

impl From<KindArg> for OverlayKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Stamp => Self::Stamp,
            KindArg::Signature => Self::Signature,
        }
    }
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad X in {s:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad Y in {s:?}: {e}"))?;
    Ok(Point::new(x, y))
}

fn parse_size(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got {s:?}"))?;
    let w = w.trim().parse().map_err(|e| format!("bad width in {s:?}: {e}"))?;
    let h = h.trim().parse().map_err(|e| format!("bad height in {s:?}: {e}"))?;
    Ok(Size::new(w, h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn points_and_sizes_parse() {
        assert_eq!(parse_point("10,-4").unwrap(), Point::new(10, -4));
        assert_eq!(parse_point(" 3 , 5 ").unwrap(), Point::new(3, 5));
        assert!(parse_point("10;4").is_err());
        assert_eq!(parse_size("800x650").unwrap(), Size::new(800, 650));
        assert!(parse_size("800").is_err());
        assert!(parse_size("-1x5").is_err());
    }

    #[test]
    fn preview_width_must_be_in_range() {
        for bad in ["0", "4097"] {
            let result = Cli::try_parse_from(["stempel", "preview", "doc.png", "-o", "p.png", "--preview-width", bad]);
            assert!(result.is_err(), "{bad} accepted");
        }
        let cli = Cli::try_parse_from(["stempel", "preview", "doc.png", "-o", "p.png", "--preview-width", "800"])
            .unwrap();
        match cli.command {
            Commands::Preview { placement, .. } => assert_eq!(placement.preview_width, 800),
            _ => panic!("expected preview"),
        }
    }

    #[test]
    fn sign_collects_repeated_positions() {
        let cli = Cli::try_parse_from([
            "stempel",
            "sign",
            "doc.png",
            "--stamp-at",
            "10,10",
            "--stamp-at",
            "50,60",
            "--signature-at",
            "5,5",
        ])
        .unwrap();
        match cli.command {
            Commands::Sign { placement, output } => {
                assert_eq!(placement.stamp_at.len(), 2);
                assert_eq!(placement.signature_at, vec![Point::new(5, 5)]);
                assert_eq!(placement.preview_width, 600);
                assert!(output.is_none());
            }
            _ => panic!("expected sign"),
        }
    }
}
