use chordsheet::{RenderingOptions, Song};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "chordsheet", about = "Transpose and inspect chords in song sheets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the song with chords rendered
    Render {
        /// Song file (plain text, optional YAML frontmatter)
        file: PathBuf,

        #[command(flatten)]
        render: RenderArgs,

        /// Wrap each chord in this HTML tag, e.g. `span class="chord"`
        #[arg(long)]
        tag: Option<String>,
    },

    /// List the chords of a song
    Chords {
        file: PathBuf,

        #[command(flatten)]
        render: RenderArgs,

        /// Each chord once, in order of first appearance
        #[arg(long)]
        unique: bool,

        /// Print the source chords with their offsets as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the detected key
    Key {
        file: PathBuf,

        #[command(flatten)]
        render: RenderArgs,
    },
}

#[derive(Args)]
struct RenderArgs {
    /// Semitones to transpose by (negative goes down)
    #[arg(short, long, allow_hyphen_values = true)]
    transpose: Option<i32>,

    /// Write B natural as H
    #[arg(long)]
    german: bool,

    /// Spell accidentals with flats
    #[arg(long, conflicts_with = "sharps")]
    flats: bool,

    /// Spell accidentals with sharps
    #[arg(long)]
    sharps: bool,

    /// YAML file with default rendering options
    #[arg(long)]
    config: Option<PathBuf>,
}

impl RenderArgs {
    fn options(&self) -> RenderingOptions {
        let mut options = match &self.config {
            Some(path) => {
                let content = read_file(path);
                RenderingOptions::from_yaml(&content).unwrap_or_else(|e| {
                    eprintln!("Error in config '{}': {}", path.display(), e);
                    process::exit(1);
                })
            }
            None => RenderingOptions::default(),
        };
        if let Some(steps) = self.transpose {
            options.transpose_semitones = steps;
        }
        if self.german {
            options.use_h = true;
        }
        if self.flats {
            options.prefer_flat = Some(true);
        } else if self.sharps {
            options.prefer_flat = Some(false);
        }
        options
    }
}

fn read_file(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path.display(), e);
        process::exit(1);
    })
}

fn read_song(path: &Path) -> Song {
    Song::parse(&read_file(path)).unwrap_or_else(|e| {
        eprintln!("Error in '{}': {}", path.display(), e);
        process::exit(1);
    })
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Render { file, render, tag } => {
            let song = read_song(&file);
            let mut options = render.options();
            if tag.is_some() {
                options.html_tag = tag;
            }
            if let Some(title) = &song.metadata.title {
                eprintln!("{}", title);
            }
            print!("{}", song.render(&options));
        }
        Command::Chords { file, render, unique, json } => {
            let song = read_song(&file);
            let options = render.options();
            if json {
                let occurrences = song.chords();
                match serde_json::to_string_pretty(&occurrences) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        eprintln!("Error encoding chords: {}", e);
                        process::exit(1);
                    }
                }
            } else if unique {
                println!("{}", song.unique_chord_names(&options).join(" "));
            } else {
                let options = song.rendering_options(&options);
                let names: Vec<String> = song
                    .chords()
                    .iter()
                    .map(|o| chordsheet::render_chord(&o.chord, &options))
                    .collect();
                println!("{}", names.join(" "));
            }
        }
        Command::Key { file, render } => {
            let song = read_song(&file);
            match song.key_name(&render.options()) {
                Some(name) => println!("{}", name),
                None => {
                    eprintln!("No key detected");
                    process::exit(1);
                }
            }
        }
    }
}
