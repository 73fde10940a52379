use std::env;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Mutex;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

use nclip::clipboard::ClipboardSource;
use nclip::commands::{self, App};
use nclip::discovery::HostDiscovery;
use nclip::error::Result;
use nclip::session::Session;
use nclip::store::EntryStore;

// Serializes tests that change the current directory
static CWD_LOCK: Mutex<()> = Mutex::new(());

struct CwdGuard {
    previous: PathBuf,
}

impl CwdGuard {
    fn enter(dir: &Utf8Path) -> Self {
        let previous = env::current_dir().unwrap();
        env::set_current_dir(dir).unwrap();
        Self { previous }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.previous);
    }
}

struct FixedClipboard(Option<Vec<u8>>);

impl ClipboardSource for FixedClipboard {
    fn read(&mut self) -> Result<Option<Vec<u8>>> {
        Ok(self.0.clone())
    }
}

struct FixedHosts(Vec<String>);

impl HostDiscovery for FixedHosts {
    fn hosts(&mut self) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

fn cache_dir(temp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(temp.path().join("cache")).expect("utf8 path")
}

fn session(temp: &TempDir, clipboard: Option<&[u8]>) -> Session<Vec<u8>> {
    let app = App::new(EntryStore::new(cache_dir(temp)), Vec::new())
        .with_clipboard(FixedClipboard(clipboard.map(<[u8]>::to_vec)));
    Session::new(commands::registry(), app)
}

fn output(session: Session<Vec<u8>>) -> String {
    String::from_utf8(session.into_app().out).unwrap()
}

fn argv(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

#[test]
fn test_interactive_add_then_view() {
    let temp = TempDir::new().unwrap();
    let mut session = session(&temp, None);

    let input = Cursor::new("add \"hello   world\" again\nview\nquit\nview\n");
    session.run(input).unwrap();

    assert!(!session.is_running());
    let out = output(session);
    assert!(out.starts_with("[nclip]$ "));
    assert!(out.contains("0 - (text) hello   world again\n"));
    // nothing after quit is executed
    assert_eq!(out.matches("0 - (text)").count(), 1);
}

#[test]
fn test_interactive_errors_do_not_stop_session() {
    let temp = TempDir::new().unwrap();
    let mut session = session(&temp, None);

    let input = Cursor::new("bogus\nadd \"open\nadd_file\nadd_dir /definitely/not/here\n\nadd ok\nv\n");
    session.run(input).unwrap();

    // end of input stops the loop without quit
    assert!(session.is_running());
    let out = output(session);
    assert!(out.contains("command 'bogus' does not exist"));
    assert!(out.contains("unclosed string"));
    assert!(out.contains("expected 1 args but got 0"));
    assert!(out.contains("does not exist"));
    assert!(out.contains("0 - (text) ok\n"));
}

#[test]
fn test_quit_alias() {
    let temp = TempDir::new().unwrap();
    let mut session = session(&temp, None);
    session.run(Cursor::new("q\nadd late\n")).unwrap();

    assert!(!session.is_running());
    assert!(session.app().store.list().unwrap().is_empty());
}

#[test]
fn test_one_shot_error_is_reported_not_returned() {
    let temp = TempDir::new().unwrap();
    let mut session = session(&temp, None);

    let result = session.run_once(&argv(&["missing", "arg"]));
    assert!(result.is_ok());
    assert_eq!(output(session), "command 'missing' does not exist\n");
}

#[test]
fn test_one_shot_args_are_not_tokenized() {
    let temp = TempDir::new().unwrap();
    let mut session = session(&temp, None);

    session.run_once(&argv(&["a", "\"quoted", "words"])).unwrap();
    let entries = session.app().store.list().unwrap();
    assert_eq!(entries[0].data(), Some(&b"\"quoted words"[..]));
}

#[test]
fn test_add_without_args_reads_clipboard() {
    let temp = TempDir::new().unwrap();
    let mut session = session(&temp, Some(b"from the clipboard"));

    session.run_once(&argv(&["add"])).unwrap();
    let entries = session.app().store.list().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].data(), Some(&b"from the clipboard"[..]));
}

#[test]
fn test_add_with_empty_clipboard_adds_nothing() {
    let temp = TempDir::new().unwrap();
    let mut session = session(&temp, Some(b""));

    session.run_once(&argv(&["add"])).unwrap();
    assert!(session.app().store.list().unwrap().is_empty());
    assert_eq!(output(session), "nothing added from clipboard\n");
}

#[test]
fn test_add_file_and_dir_commands() {
    let temp = TempDir::new().unwrap();
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
    fs::write(root.join("todo.txt"), b"buy milk").unwrap();
    fs::create_dir_all(root.join("photos/2024")).unwrap();
    fs::write(root.join("photos/2024/a.jpg"), b"jpg").unwrap();

    let mut session = session(&temp, None);
    session
        .run_once(&argv(&["af", root.join("todo.txt").as_str()]))
        .unwrap();
    session
        .run_once(&argv(&["add_dir", root.join("photos").as_str()]))
        .unwrap();
    session.run_once(&argv(&["view"])).unwrap();

    let out = output(session);
    assert!(out.contains("(file) todo.txt"));
    assert!(out.contains("(directory) photos"));
}

#[test]
fn test_view_ignores_host_argument() {
    let temp = TempDir::new().unwrap();
    let mut session = session(&temp, None);
    session.run_once(&argv(&["add", "x"])).unwrap();
    session.run_once(&argv(&["view", "otherhost"])).unwrap();

    assert!(output(session).contains("0 - (text) x\n"));
}

#[test]
fn test_help_for_single_command() {
    let temp = TempDir::new().unwrap();
    let mut session = session(&temp, None);
    session.run_once(&argv(&["h", "ad"])).unwrap();

    let out = output(session);
    assert!(out.starts_with("ad | add_dir: "));
    assert!(out.contains("\tUsage: add_dir <string>"));
}

#[test]
fn test_help_overview_lists_builtins() {
    let temp = TempDir::new().unwrap();
    let mut session = session(&temp, None);
    session.run_once(&argv(&["help"])).unwrap();

    let out = output(session);
    for name in ["help", "quit", "add", "add_dir", "add_file", "view", "view_servers"] {
        assert!(out.contains(&format!("{name}: ")), "missing {name}");
    }
    assert!(out.contains("Usage: add |string...|"));
}

#[test]
fn test_view_servers_without_backend_reports_error() {
    let temp = TempDir::new().unwrap();
    let mut session = session(&temp, None);
    session.run_once(&argv(&["vs"])).unwrap();

    assert!(output(session).starts_with("host discovery failed"));
}

#[test]
fn test_view_servers_lists_hosts() {
    let temp = TempDir::new().unwrap();
    let app = App::new(EntryStore::new(cache_dir(&temp)), Vec::new())
        .with_discovery(FixedHosts(vec!["alpha".to_string(), "beta".to_string()]));
    let mut session = Session::new(commands::registry(), app);
    session.run_once(&argv(&["view_servers"])).unwrap();

    assert_eq!(output(session), "alpha\nbeta\n");
}

#[test]
fn test_custom_prompt() {
    let temp = TempDir::new().unwrap();
    let mut session = session(&temp, None).with_app_name("clips");
    session.run(Cursor::new("quit\n")).unwrap();
    assert_eq!(output(session), "[clips]$ ");
}

#[test]
fn test_add_dir_resolves_parent_segment_name() {
    let temp = TempDir::new().unwrap();
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
    fs::create_dir_all(root.join("proj/sub")).unwrap();
    fs::write(root.join("proj/readme.md"), b"hi").unwrap();

    let mut session = session(&temp, None);
    let dotted = format!("{}/proj/sub/..", root);
    session.run_once(&argv(&["add_dir", &dotted])).unwrap();
    session.run_once(&argv(&["view"])).unwrap();

    let out = output(session);
    assert!(!out.contains("require a display name"), "{out}");
    assert!(out.contains("0 - (directory) proj\n"), "{out}");
}

#[test]
fn test_add_dir_and_file_relative_to_current_dir() {
    let _lock = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let temp = TempDir::new().unwrap();
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
    fs::create_dir_all(root.join("proj")).unwrap();
    fs::write(root.join("proj/todo.txt"), b"buy milk").unwrap();

    let mut session = session(&temp, None);
    {
        let _cwd = CwdGuard::enter(&root.join("proj"));
        session.run_once(&argv(&["add_dir", "."])).unwrap();
        session.run_once(&argv(&["af", "./todo.txt"])).unwrap();
    }
    session.run_once(&argv(&["view"])).unwrap();

    let out = output(session);
    assert!(!out.contains("require a display name"), "{out}");
    assert!(out.contains("(directory) proj"), "{out}");
    assert!(out.contains("(file) todo.txt"), "{out}");
}

#[test]
fn test_command_name_split_on_tab() {
    let temp = TempDir::new().unwrap();
    let mut session = session(&temp, None);

    session.exec_line("add\thello\n").unwrap();
    session.exec_line("view").unwrap();

    let out = output(session);
    assert!(!out.contains("does not exist"), "{out}");
    assert!(out.contains("0 - (text) hello\n"), "{out}");
}

#[test]
fn test_unset_variable_in_path_is_validation_error() {
    let temp = TempDir::new().unwrap();
    let mut session = session(&temp, None);

    session
        .run_once(&argv(&["add_file", "$NCLIP_SESSION_TEST_UNSET_VAR/x"]))
        .unwrap();

    let out = output(session);
    assert!(out.starts_with("failed to expand"), "{out}");
    assert!(!out.contains("configuration error"), "{out}");
}
