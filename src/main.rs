use clap::Parser;
use fltk::{enums, prelude::*, *};
use meadow::config;
use meadow::document::{FileStore, TextFile};
use meadow::fltk_text_entry::create_text_entry_widget;
use meadow::textedit::text_entry::{EntryColors, TextEntry};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

const MENU_HEIGHT: i32 = 25;
const STATUS_HEIGHT: i32 = 25;

#[derive(Parser, Debug)]
#[command(name = "meadow")]
#[command(about = "A small plain-text editor", long_about = None)]
struct Args {
    /// File to open on startup
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

struct AppState {
    current_file: Option<TextFile>,
}

impl AppState {
    fn new() -> Self {
        AppState { current_file: None }
    }

    fn open(&mut self, path: &PathBuf) -> Result<String, String> {
        let file = FileStore::load(path)?;
        let content = file.content.clone();
        self.current_file = Some(file);
        Ok(content)
    }

    fn save(&mut self, content: String) -> Result<PathBuf, String> {
        match &mut self.current_file {
            Some(file) => {
                file.content = content;
                FileStore::save(file)?;
                Ok(file.path.clone())
            }
            None => Err("No file to save to".to_string()),
        }
    }

    fn save_as(&mut self, path: PathBuf, content: String) -> Result<PathBuf, String> {
        let file = TextFile { path, content };
        FileStore::save(&file)?;
        let path = file.path.clone();
        self.current_file = Some(file);
        Ok(path)
    }
}

fn set_status(status: &Rc<RefCell<frame::Frame>>, text: &str) {
    let stamp = chrono::Local::now().format("%H:%M:%S");
    status.borrow_mut().set_label(&format!("[{}] {}", stamp, text));
    app::redraw();
}

fn report_error(status: &Rc<RefCell<frame::Frame>>, message: &str) {
    set_status(status, message);
    dialog::alert_default(message);
}

fn open_helper(
    path: &PathBuf,
    app_state: &Rc<RefCell<AppState>>,
    entry: &Rc<RefCell<TextEntry>>,
    status: &Rc<RefCell<frame::Frame>>,
) {
    match app_state.borrow_mut().open(path) {
        Ok(content) => {
            let is_new = content.is_empty() && !path.exists();
            entry.borrow_mut().set_contents(&content);
            let label = if is_new {
                format!("New file: {}", path.display())
            } else {
                format!("Opened {}", path.display())
            };
            set_status(status, &label);
        }
        Err(e) => report_error(status, &format!("Error: {}", e)),
    }
}

fn save_helper(
    app_state: &Rc<RefCell<AppState>>,
    entry: &Rc<RefCell<TextEntry>>,
    status: &Rc<RefCell<frame::Frame>>,
) {
    let has_file = app_state.borrow().current_file.is_some();
    if !has_file {
        save_as_helper(app_state, entry, status);
        return;
    }
    let content = entry.borrow().to_text();
    match app_state.borrow_mut().save(content) {
        Ok(path) => set_status(status, &format!("Saved {}", path.display())),
        Err(e) => report_error(status, &format!("Error: {}", e)),
    }
}

fn save_as_helper(
    app_state: &Rc<RefCell<AppState>>,
    entry: &Rc<RefCell<TextEntry>>,
    status: &Rc<RefCell<frame::Frame>>,
) {
    let mut chooser = dialog::NativeFileChooser::new(dialog::NativeFileChooserType::BrowseSaveFile);
    chooser.show();
    let path = chooser.filename();
    if path.as_os_str().is_empty() {
        return;
    }
    let content = entry.borrow().to_text();
    match app_state.borrow_mut().save_as(path, content) {
        Ok(path) => set_status(status, &format!("Saved {}", path.display())),
        Err(e) => report_error(status, &format!("Error: {}", e)),
    }
}

fn create_menu(
    width: i32,
    app_state: Rc<RefCell<AppState>>,
    entry: Rc<RefCell<TextEntry>>,
    status: Rc<RefCell<frame::Frame>>,
) -> menu::MenuBar {
    let mut menu_bar = menu::MenuBar::new(0, 0, width, MENU_HEIGHT, None);

    {
        let app_state = app_state.clone();
        let entry = entry.clone();
        let status = status.clone();
        menu_bar.add(
            "&File/&Open...",
            enums::Shortcut::Ctrl | 'o',
            menu::MenuFlag::Normal,
            move |_| {
                let mut chooser =
                    dialog::NativeFileChooser::new(dialog::NativeFileChooserType::BrowseFile);
                chooser.show();
                let path = chooser.filename();
                if !path.as_os_str().is_empty() {
                    open_helper(&path, &app_state, &entry, &status);
                }
            },
        );
    }

    {
        let app_state = app_state.clone();
        let entry = entry.clone();
        let status = status.clone();
        menu_bar.add(
            "&File/&Save",
            enums::Shortcut::Ctrl | 's',
            menu::MenuFlag::Normal,
            move |_| {
                save_helper(&app_state, &entry, &status);
            },
        );
    }

    {
        let app_state = app_state.clone();
        let entry = entry.clone();
        let status = status.clone();
        menu_bar.add(
            "&File/Save &As...",
            enums::Shortcut::Ctrl | enums::Shortcut::Shift | 's',
            menu::MenuFlag::Normal,
            move |_| {
                save_as_helper(&app_state, &entry, &status);
            },
        );
    }

    // Reset discards unsaved edits by re-reading the file from disk
    {
        let app_state = app_state.clone();
        let entry = entry.clone();
        let status = status.clone();
        menu_bar.add(
            "&File/&Reset",
            enums::Shortcut::Ctrl | 'r',
            menu::MenuFlag::MenuDivider,
            move |_| {
                let path = app_state
                    .borrow()
                    .current_file
                    .as_ref()
                    .map(|f| f.path.clone());
                match path {
                    Some(path) => open_helper(&path, &app_state, &entry, &status),
                    None => {
                        entry.borrow_mut().set_contents("");
                        set_status(&status, "Reset");
                    }
                }
            },
        );
    }

    menu_bar.add(
        "&File/&Quit",
        enums::Shortcut::Ctrl | 'q',
        menu::MenuFlag::Normal,
        move |_| {
            if let Some(mut wind) = app::first_window() {
                wind.do_callback();
            }
        },
    );

    menu_bar
}

fn main() {
    let args = Args::parse();

    let config_path = config::config_file_path();
    let cfg = config_path
        .as_ref()
        .and_then(|p| config::load_config(p))
        .unwrap_or_default();

    let app = app::App::default();
    let mut wind = window::Window::default()
        .with_size(cfg.window.width, cfg.window.height)
        .with_label("meadow");

    wind.begin();

    let app_state = Rc::new(RefCell::new(AppState::new()));

    let colors = EntryColors {
        background: cfg.theme.background_rgba(),
        text: cfg.theme.text_rgba(),
        highlight: cfg.theme.highlight_rgba(),
        caret: cfg.theme.caret_rgba(),
    };
    let (entry_widget, entry) = create_text_entry_widget(
        0,
        MENU_HEIGHT,
        cfg.window.width,
        cfg.window.height - MENU_HEIGHT - STATUS_HEIGHT,
        enums::Font::Courier,
        cfg.font_size,
        colors,
        "",
    );

    let status = Rc::new(RefCell::new({
        let mut f = frame::Frame::new(
            0,
            cfg.window.height - STATUS_HEIGHT,
            cfg.window.width,
            STATUS_HEIGHT,
            None,
        );
        f.set_frame(enums::FrameType::FlatBox);
        f.set_color(enums::Color::Black);
        f.set_label_color(enums::Color::White);
        f.set_align(enums::Align::Inside | enums::Align::Left);
        f.set_label("Ready");
        f
    }));

    let _menu_bar = create_menu(
        cfg.window.width,
        app_state.clone(),
        entry.clone(),
        status.clone(),
    );

    wind.end();
    wind.resizable(&entry_widget);
    wind.show();

    if let Some(path) = &args.file {
        open_helper(path, &app_state, &entry, &status);
    }

    // Persist window geometry when the window is closed
    wind.set_callback({
        let app = app;
        move |w| {
            if let Some(path) = &config_path {
                let mut cfg = cfg.clone();
                cfg.window.width = w.width();
                cfg.window.height = w.height();
                if let Err(e) = config::save_config(path, &cfg) {
                    eprintln!("Failed to save config: {}", e);
                }
            }
            app.quit();
        }
    });

    app.run().unwrap();
}
