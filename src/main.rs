//! svgview - Browse and preview the image and SVG assets of a workspace.
//!
//! Usage:
//!   svgview [PATHS...]          Launch interactive TUI
//!   svgview scan PATH           List the assets under PATH
//!   svgview tree [PATHS...]     Print the browsing tree
//!   svgview open [PATH]         Render the gallery page (-w DIR adds workspace folders)
//!   svgview dispatch            Run gallery messages read from stdin
//!   svgview --help              Show help

mod logging;

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, eyre};

use svgview_core::{ImageFile, TreeNode, WorkspaceFolder};
use svgview_scan::{scan_directory, scan_for_tree};
use svgview_tree::ImageTreeProvider;
use svgview_tui::{ItemPresentation, SystemHost, TuiConfig, UserSettings, cache_dir};
use svgview_webview::{
    Dispatch, GalleryDocument, GalleryPanel, HostActions, collect_images, handle_raw,
    resolve_target,
};

#[derive(Parser)]
#[command(
    name = "svgview",
    version,
    about = "Browse and preview the image and SVG assets of a workspace",
    long_about = "svgview lists the SVG and bitmap images under your workspace folders.\n\n\
                  Launch the interactive TUI by running `svgview [PATHS...]`, or use \
                  subcommands for scripting."
)]
struct Cli {
    /// Workspace folders to browse (defaults to the configured folders, then the current directory)
    paths: Vec<PathBuf>,

    /// Log debug output (overridden by SVGVIEW_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List the image assets under a path
    Scan {
        /// Directory or file to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Skip hidden and dependency folders, as the tree does
        #[arg(short, long)]
        tree: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the browsing tree with per-folder image counts
    Tree {
        /// Workspace folders
        paths: Vec<PathBuf>,

        /// Maximum depth to display
        #[arg(short, long)]
        depth: Option<usize>,
    },

    /// Render the gallery page for a file or folder
    Open {
        /// Target (defaults to the first workspace folder)
        path: Option<PathBuf>,

        /// Workspace folder allowed as a resource root (repeatable)
        #[arg(short = 'w', long = "folder", value_name = "DIR")]
        folders: Vec<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open the page in the system browser
        #[arg(short, long)]
        browser: bool,
    },

    /// Read gallery messages from stdin, one JSON object per line, and run them
    Dispatch,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// File name of the rendered gallery page when opened in the browser.
const GALLERY_FILE: &str = "gallery.html";

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let settings = UserSettings::load();

    match cli.command {
        Some(command) => {
            logging::init_stderr(cli.verbose);
            match command {
                Command::Scan { path, tree, format } => run_scan(&path, tree, format)?,
                Command::Tree { paths, depth } => {
                    let folders = workspace_folders(&paths, &settings)?;
                    run_tree(folders, depth);
                }
                Command::Open {
                    path,
                    folders,
                    output,
                    browser,
                } => {
                    let folders = workspace_folders(&folders, &settings)?;
                    run_open(path.as_deref(), &folders, output, browser, &settings)?;
                }
                Command::Dispatch => run_dispatch(&settings)?,
            }
        }
        None => {
            let _guard = logging::init_file(&cache_dir(), cli.verbose);
            let folders = workspace_folders(&cli.paths, &settings)?;
            svgview_tui::run(folders, TuiConfig::new(settings))?;
        }
    }

    Ok(())
}

/// Folders from the command line, then from the settings, then the current directory.
fn workspace_folders(paths: &[PathBuf], settings: &UserSettings) -> Result<Vec<WorkspaceFolder>> {
    let paths = if !paths.is_empty() {
        paths.to_vec()
    } else if !settings.workspace_folders.is_empty() {
        settings.workspace_folders.clone()
    } else {
        vec![PathBuf::from(".")]
    };

    paths
        .iter()
        .map(|path| {
            let path = path
                .canonicalize()
                .with_context(|| format!("Invalid path: {}", path.display()))?;
            Ok(WorkspaceFolder::new(path))
        })
        .collect()
}

/// List the assets under a path.
fn run_scan(path: &Path, tree: bool, format: OutputFormat) -> Result<()> {
    let path = path.canonicalize().context("Invalid path")?;

    eprintln!("Scanning {}...", path.display());

    let images = if tree {
        scan_for_tree(&path)
    } else {
        scan_directory(&path).context("Scan failed")?
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&images)?);
        }
        OutputFormat::Text => {
            for image in &images {
                print_image(image, &path);
            }
            eprintln!("{} image(s)", images.len());
        }
    }

    Ok(())
}

fn print_image(image: &ImageFile, root: &Path) {
    let relative = image.path.strip_prefix(root).unwrap_or(&image.path);
    println!("{:<6} {}", image.kind, relative.display());
}

/// Print the browsing tree, fetching one level at a time.
fn run_tree(folders: Vec<WorkspaceFolder>, max_depth: Option<usize>) {
    let mut provider = ImageTreeProvider::new(folders);
    let roots = provider.children(None);

    if roots.is_empty() {
        eprintln!("No images found in the workspace");
        return;
    }

    for root in &roots {
        print_node(&mut provider, root, 0, max_depth.unwrap_or(usize::MAX));
    }
}

fn print_node(provider: &mut ImageTreeProvider, node: &TreeNode, depth: usize, max_depth: usize) {
    let item = ItemPresentation::from_node(node);
    let indent = "  ".repeat(depth);
    if item.description.is_empty() {
        println!("{indent}{} {}", item.icon, item.label);
    } else {
        println!("{indent}{} {}  {}", item.icon, item.label, item.description);
    }

    if node.is_folder() && depth < max_depth {
        for child in provider.children(Some(node)) {
            print_node(provider, &child, depth + 1, max_depth);
        }
    }
}

/// Render the gallery page for a target.
fn run_open(
    explicit: Option<&Path>,
    folders: &[WorkspaceFolder],
    output: Option<PathBuf>,
    browser: bool,
    settings: &UserSettings,
) -> Result<()> {
    let explicit = canonical_target(explicit)?;
    let found = resolve_target(explicit.as_deref(), None, folders)
        .and_then(|target| collect_images(&target).map(|images| (target, images)));

    let (target, images) = match found {
        Ok(found) => found,
        Err(e) if e.is_informational() => {
            eprintln!("{e}");
            return Ok(());
        }
        Err(e) => return Err(e).context("Unable to open gallery"),
    };

    let document = GalleryDocument::builder()
        .asset_dir(settings.resolved_asset_dir())
        .locale(settings.locale.clone())
        .build()?;
    let roots: Vec<PathBuf> = folders.iter().map(|f| f.path.clone()).collect();

    let mut panel = GalleryPanel::new(document, &roots);
    panel.update_images(images, &target);
    eprintln!("{} image(s) in {}", panel.images().len(), target.display());

    let page = match (output, browser) {
        (Some(output), _) => output,
        (None, true) => {
            let dir = cache_dir();
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            dir.join(GALLERY_FILE)
        }
        (None, false) => {
            println!("{}", panel.html());
            return Ok(());
        }
    };

    std::fs::write(&page, panel.html())
        .with_context(|| format!("Failed to write {}", page.display()))?;
    eprintln!("Wrote {}", page.display());

    if browser {
        let page = page.canonicalize().context("Invalid output path")?;
        let url = url::Url::from_file_path(&page)
            .map_err(|()| eyre!("Cannot address {}", page.display()))?;
        SystemHost::new(settings.editor.clone()).open_external(url.as_str())?;
    }

    Ok(())
}

/// Absolute form of an explicit target, so gallery locators never carry relative paths.
fn canonical_target(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    explicit
        .map(|path| {
            path.canonicalize()
                .with_context(|| format!("Invalid path: {}", path.display()))
        })
        .transpose()
}

/// Run gallery messages read from stdin.
fn run_dispatch(settings: &UserSettings) -> Result<()> {
    let mut host = SystemHost::new(settings.editor.clone());

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        match handle_raw(&mut host, &line) {
            Dispatch::Handled(message) => eprintln!("{}: done", message.command()),
            Dispatch::Ignored => eprintln!("ignored: {line}"),
            Dispatch::Failed(e) => eprintln!("{e}"),
        }
    }

    Ok(())
}
