use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use regex::Regex;

/// Rename videos and subtitles so players pick up the subtitles automatically.
#[derive(Debug, Parser)]
#[command(name = "subtitle-rename", version, about)]
pub struct Cli {
    /// Folder containing the videos and subtitles (prompted for when omitted)
    pub folder: Option<PathBuf>,

    /// Show title used for the new file names (prompted for when omitted)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Print planned renames without changing files
    #[arg(long)]
    pub dry_run: bool,

    /// Rename without asking for confirmation
    #[arg(short = 'y', long = "yes")]
    pub assume_yes: bool,

    /// Print a JSON report instead of human-readable output
    #[arg(long)]
    pub json: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub folder: PathBuf,
    pub title: String,
    pub dry_run: bool,
    pub assume_yes: bool,
    pub json: bool,
}

/// Reads answers line by line from any input, echoing prompts to any output.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Show `prompt` and return the trimmed answer.
    ///
    /// Hitting end of input before typing anything is an error.
    pub fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        let answer = line.trim();

        if read == 0 || (answer.is_empty() && !line.ends_with('\n')) {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no input"));
        }

        Ok(answer.to_string())
    }

    /// Ask until the answer is yes/y or no/n.
    pub fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        loop {
            let answer = self.ask(prompt)?.to_lowercase();

            match answer.as_str() {
                "yes" | "y" => return Ok(true),
                "no" | "n" => return Ok(false),
                _ => writeln!(self.output, "Please answer with yes/y or no/n.")?,
            }
        }
    }
}

pub struct ConfigBuilder {
    folder: Option<PathBuf>,
    title: Option<String>,
    dry_run: bool,
    assume_yes: bool,
    json: bool,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            folder: None,
            title: None,
            dry_run: false,
            assume_yes: false,
            json: false,
        }
    }

    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            folder: cli.folder.clone(),
            title: cli.title.clone(),
            dry_run: cli.dry_run,
            assume_yes: cli.assume_yes,
            json: cli.json,
        }
    }

    pub fn folder<P: AsRef<Path>>(mut self, folder: P) -> Self {
        self.folder = Some(folder.as_ref().to_path_buf());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Ask for whatever the command line left out.
    pub fn prompt_missing<R: BufRead, W: Write>(mut self, prompt: &mut Prompt<R, W>) -> Result<Self> {
        if self.folder.is_none() {
            let folder = prompt
                .ask("Enter the path to the folder containing the videos and subtitles: ")
                .context("reading folder path")?;
            self.folder = Some(PathBuf::from(folder));
        }

        if self.title.is_none() {
            let title = prompt
                .ask("Enter the name of the show: ")
                .context("reading show title")?;
            self.title = Some(title);
        }

        Ok(self)
    }

    pub fn build(self) -> Result<AppConfig> {
        let folder = self.folder.ok_or_else(|| anyhow!("Folder path is required"))?;
        let title = self.title.ok_or_else(|| anyhow!("Show title is required"))?;

        validate_folder(&folder)?;
        validate_title(&title)?;

        Ok(AppConfig {
            folder,
            title: title.trim().to_string(),
            dry_run: self.dry_run,
            assume_yes: self.assume_yes,
            json: self.json,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

static INVALID_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("filename character class is a valid regex"));

pub fn validate_folder(folder: &Path) -> Result<()> {
    if folder.to_string_lossy().trim().is_empty() {
        bail!("folder path is empty");
    }

    let metadata = std::fs::metadata(folder)
        .with_context(|| format!("checking folder path {}", folder.display()))?;
    if !metadata.is_dir() {
        bail!("folder path is not a directory: {}", folder.display());
    }

    Ok(())
}

pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        bail!("show title is empty");
    }

    if INVALID_FILENAME_CHARS.is_match(title) {
        bail!("show title contains invalid filename characters: {}", title);
    }

    Ok(())
}
