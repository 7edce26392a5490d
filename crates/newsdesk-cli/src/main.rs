mod preview;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use newsdesk_config::Config;
use newsdesk_engine::{
    ArticleIndex, BlockId, DecodeMode, Draft, FsArticleStore, FsImageStore, ImageUpload,
    attach_cover, attach_image, render, render::html::to_html, validate, wire,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use relative_path::RelativePathBuf;
use std::{
    env,
    io::{Stdout, stdout},
    path::{Path, PathBuf},
    process,
};

use preview::preview_lines;

struct App {
    store: FsArticleStore,
    index: ArticleIndex,
    list_state: ListState,
    current_content: Vec<String>,
}

impl App {
    fn new(store: FsArticleStore) -> Result<Self> {
        let index = store.scan()?;

        let mut app = Self {
            store,
            index,
            list_state: ListState::default(),
            current_content: Vec::new(),
        };

        if !app.index.is_empty() {
            app.list_state.select(Some(0));
            app.update_content_for_selection();
        }

        Ok(app)
    }

    fn next_article(&mut self) {
        if self.index.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % self.index.len(),
            None => 0,
        };
        self.list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn previous_article(&mut self) {
        if self.index.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.index.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn reload(&mut self) -> Result<()> {
        self.index = self.store.scan()?;
        let selected = self
            .list_state
            .selected()
            .filter(|i| *i < self.index.len())
            .or((!self.index.is_empty()).then_some(0));
        self.list_state.select(selected);
        self.update_content_for_selection();
        Ok(())
    }

    fn delete_selected(&mut self) -> Result<()> {
        let Some(entry) = self
            .list_state
            .selected()
            .and_then(|index| self.index.get(index))
        else {
            return Ok(());
        };
        let relative_path = entry.relative_path.clone();

        self.store.delete(&relative_path)?;
        self.index.remove_entry(&relative_path);
        if self.index.is_empty() {
            self.list_state.select(None);
        } else if let Some(i) = self.list_state.selected() {
            self.list_state.select(Some(i.min(self.index.len() - 1)));
        }
        self.update_content_for_selection();
        Ok(())
    }

    fn update_content_for_selection(&mut self) {
        let Some(entry) = self
            .list_state
            .selected()
            .and_then(|index| self.index.get(index))
        else {
            self.current_content.clear();
            return;
        };

        self.current_content = match self.store.load(&entry.relative_path, DecodeMode::Lenient) {
            Ok(article) => preview_lines(&render(&article)),
            Err(e) => vec![format!("Error reading article: {e}")],
        };
    }
}

enum Command {
    Browse(Option<PathBuf>),
    Render(PathBuf),
    Check(PathBuf),
    Upload {
        article: PathBuf,
        block: String,
        image: PathBuf,
    },
    Cover {
        article: PathBuf,
        image: PathBuf,
    },
}

fn parse_args(args: &[String]) -> Option<Command> {
    match args {
        [_] => Some(Command::Browse(None)),
        [_, cmd, file] if cmd == "render" => Some(Command::Render(PathBuf::from(file))),
        [_, cmd, file] if cmd == "check" => Some(Command::Check(PathBuf::from(file))),
        [_, cmd, article, block, image] if cmd == "upload" => Some(Command::Upload {
            article: PathBuf::from(article),
            block: block.clone(),
            image: PathBuf::from(image),
        }),
        [_, cmd, article, image] if cmd == "cover" => Some(Command::Cover {
            article: PathBuf::from(article),
            image: PathBuf::from(image),
        }),
        [_, path] => Some(Command::Browse(Some(PathBuf::from(path)))),
        _ => None,
    }
}

fn usage(program: &str) {
    eprintln!("Usage: {program} [articles-folder-path]");
    eprintln!("       {program} render <article.json>");
    eprintln!("       {program} check <article.json>");
    eprintln!("       {program} upload <article.json> <block-id> <image-file>");
    eprintln!("       {program} cover <article.json> <image-file>");
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("newsdesk");

    match parse_args(&args) {
        Some(Command::Browse(path)) => browse(program, path),
        Some(Command::Render(file)) => {
            init_logging();
            render_file(&file)
        }
        Some(Command::Check(file)) => {
            init_logging();
            check_file(&file)
        }
        Some(Command::Upload {
            article,
            block,
            image,
        }) => {
            init_logging();
            upload_file(&article, &BlockId::from(block), &image)
        }
        Some(Command::Cover { article, image }) => {
            init_logging();
            cover_file(&article, &image)
        }
        None => {
            usage(program);
            process::exit(1);
        }
    }
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

/// Print the public page markup of a stored article
fn render_file(file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let article = wire::decode_article(&json, DecodeMode::Lenient)
        .with_context(|| format!("Failed to decode {}", file.display()))?;
    print!("{}", to_html(&render(&article)));
    Ok(())
}

/// Load strictly and validate as if about to publish
fn check_file(file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let result = wire::decode_article(&json, DecodeMode::Strict)
        .map_err(anyhow::Error::from)
        .and_then(|article| {
            validate::validate_article(&article)?;
            Ok(article)
        });

    match result {
        Ok(article) => {
            println!(
                "{}: ok ({} blocks)",
                file.display(),
                article.blocks.len()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("{}: {e}", file.display());
            process::exit(1);
        }
    }
}

/// Store over the directory holding `article_file`, plus the record's path inside it
fn open_record(article_file: &Path) -> Result<(FsArticleStore, RelativePathBuf)> {
    let dir = match article_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let name = article_file
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Not an article file: {}", article_file.display()))?;
    Ok((FsArticleStore::open(dir)?, RelativePathBuf::from(name)))
}

fn image_store(store: &FsArticleStore) -> Result<FsImageStore> {
    let config = Config::load()?.unwrap_or_else(|| Config::new(store.root()));
    Ok(
        FsImageStore::new(config.uploads_dir(), config.public_base_url.clone())
            .with_max_bytes(config.max_upload_bytes),
    )
}

fn read_upload(image: &Path) -> Result<ImageUpload> {
    Ok(ImageUpload {
        file_name: image
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        content_type: content_type_for(image).to_string(),
        bytes: std::fs::read(image)
            .with_context(|| format!("Failed to read {}", image.display()))?,
    })
}

/// Validate the edited draft and write it back through the store
fn save_draft(
    store: &FsArticleStore,
    loaded_from: &RelativePathBuf,
    draft: &Draft,
) -> Result<()> {
    let article = draft.finish()?;
    let saved = store.save(&article)?;
    if &saved != loaded_from {
        println!("saved as {saved}");
    }
    Ok(())
}

/// Upload an image into an image or chart block and write the article back
fn upload_file(article_file: &Path, id: &BlockId, image: &Path) -> Result<()> {
    let (store, record) = open_record(article_file)?;
    let article = store.load(&record, DecodeMode::Strict)?;
    let images = image_store(&store)?;
    let upload = read_upload(image)?;

    let mut draft = Draft::from_article(article);
    attach_image(&images, &mut draft, id, &upload)?;
    save_draft(&store, &record, &draft)?;

    println!("{}: block {id} now shows {}", article_file.display(), upload.file_name);
    Ok(())
}

/// Upload an image and make it the article's cover
fn cover_file(article_file: &Path, image: &Path) -> Result<()> {
    let (store, record) = open_record(article_file)?;
    let article = store.load(&record, DecodeMode::Strict)?;
    let images = image_store(&store)?;

    let mut draft = Draft::from_article(article);
    let url = attach_cover(&images, &mut draft, &read_upload(image)?)?;
    save_draft(&store, &record, &draft)?;

    println!("{}: cover is now {url}", article_file.display());
    Ok(())
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

fn browse(program: &str, path: Option<PathBuf>) -> Result<()> {
    let config_path = Config::config_path();
    let from_config = path.is_none();

    let articles_path = match path {
        Some(path) => path,
        None => match Config::load() {
            Ok(Some(config)) => config.articles_path,
            Ok(None) => {
                eprintln!("Error: No articles path provided and no config file found");
                usage(program);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                usage(program);
                process::exit(1);
            }
        },
    };

    let store = match FsArticleStore::open(&articles_path) {
        Ok(store) => store,
        Err(e) => {
            let source = if from_config {
                format!(" from config file '{}'", config_path.display())
            } else {
                String::new()
            };
            eprintln!(
                "Error: Articles path '{}'{} is invalid: {e}",
                articles_path.display(),
                source
            );
            process::exit(1);
        }
    };

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = App::new(store).and_then(|mut app| run_app(&mut terminal, &mut app));

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_article(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_article(),
                KeyCode::Char('r') => app.reload()?,
                KeyCode::Char('D') => app.delete_selected()?,
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(f.area());

    let article_items: Vec<ListItem> = app
        .index
        .entries()
        .map(|entry| ListItem::new(vec![Line::from(vec![Span::raw(entry.display_name.clone())])]))
        .collect();

    let articles_list = List::new(article_items)
        .block(Block::default().borders(Borders::ALL).title("Articles"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(articles_list, chunks[0], &mut app.list_state);

    let content_text = if app.current_content.is_empty() {
        vec![Line::from("Select an article to preview it")]
    } else {
        app.current_content
            .iter()
            .map(|line| Line::from(vec![Span::raw(line.clone())]))
            .collect()
    };

    let content = Paragraph::new(content_text)
        .block(Block::default().borders(Borders::ALL).title("Preview"))
        .wrap(ratatui::widgets::Wrap { trim: true });

    f.render_widget(content, chunks[1]);

    let help_text = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous | "),
        Span::raw("↓/j: Next | "),
        Span::raw("r: Reload | "),
        Span::raw("D: Delete"),
    ]);

    let help = Paragraph::new(vec![help_text]).block(Block::default());

    let bottom_chunk = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    f.render_widget(help, bottom_chunk[1]);
}
