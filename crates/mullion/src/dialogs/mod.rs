//! Modal dialogs over a uniform host contract.
//!
//! Dialog objects collect configuration, then run one modal session through a
//! [`DialogHost`] and keep its outcome. The default host routes to the native
//! backend for the target platform:
//! - macOS: AppKit (NSOpenPanel, NSAlert)
//! - Windows: Common Item Dialog and MessageBoxW
//! - Linux: XDG Desktop Portal file chooser
//!
//! Anything else gets a stub backend that reports itself unavailable, and a
//! custom host can be swapped in anywhere through [`show_with_host`]
//! (headless environments, tests, remote sessions).
//!
//! [`show_with_host`]: FileBrowserDialog::show_with_host

use std::path::{Path, PathBuf};

use mullion_core::{NativeHandle, global_registry};

use crate::enums::{DialogIcon, DialogResult};
use crate::error::{DialogError, HostResult};
use crate::lifecycle::{DialogLifecycle, ReleasePolicy};
use crate::modal::modal_tracker;

// Platform-specific backends
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "macos")]
use macos as platform;

#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "windows")]
use windows as platform;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
use linux as platform;

#[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
mod stub;
#[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
use stub as platform;

// ============================================================================
// File Dialog Types
// ============================================================================

/// Filter specification for file browser dialogs.
#[derive(Debug, Clone)]
pub struct FileFilter {
    /// Display name for the filter (e.g., "Backup Archives").
    pub name: String,
    /// File extensions to match (without leading dot, e.g., "bak", "zip").
    pub extensions: Vec<String>,
}

impl FileFilter {
    /// Create a new file filter.
    ///
    /// Extensions may be given with or without the leading dot.
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            extensions: extensions
                .iter()
                .map(|s| s.trim_start_matches('.').to_string())
                .collect(),
        }
    }

    /// Create an "All Files" filter.
    pub fn all_files() -> Self {
        Self::new("All Files", &["*"])
    }

    /// The match pattern covering every extension (`"*.bak;*.zip"`), as the
    /// Windows common dialogs expect it.
    pub fn pattern(&self) -> String {
        if self.extensions.iter().any(|e| e == "*") {
            "*.*".to_string()
        } else {
            self.extensions
                .iter()
                .map(|e| format!("*.{}", e))
                .collect::<Vec<_>>()
                .join(";")
        }
    }
}

/// What a file browser session picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileBrowserMode {
    /// Pick existing files.
    #[default]
    Open,
    /// Pick a destination file that may not exist yet.
    Save,
    /// Pick a directory.
    SelectFolder,
}

/// Configuration shared by every dialog kind.
#[derive(Debug, Clone, Default)]
pub struct DialogConfiguration {
    /// Dialog caption (window title).
    pub caption: Option<String>,
    /// Handle of the window that owns the session. The dialog is parented
    /// under it in the registry, so attached values and the data context
    /// resolve through the owner while the session lives.
    pub owner: Option<NativeHandle>,
    /// Initial directory for file dialogs. Ignored by backends whose file
    /// chooser picks its own starting location.
    pub initial_directory: Option<PathBuf>,
    /// Suggested file name for save sessions.
    pub default_name: Option<String>,
}

impl DialogConfiguration {
    /// Create new configuration with a caption.
    pub fn with_caption(caption: impl Into<String>) -> Self {
        Self {
            caption: Some(caption.into()),
            ..Default::default()
        }
    }

    /// Set the owning window.
    pub fn owner(mut self, owner: NativeHandle) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the initial directory.
    pub fn initial_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.initial_directory = Some(path.into());
        self
    }

    /// Set the suggested file name for save sessions.
    pub fn default_name(mut self, name: impl Into<String>) -> Self {
        self.default_name = Some(name.into());
        self
    }
}

// ============================================================================
// Report Dialog Types
// ============================================================================

/// Button configuration for report dialogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportButtons {
    /// Single OK button.
    #[default]
    Ok,
    /// OK and Cancel buttons.
    OkCancel,
    /// Yes and No buttons.
    YesNo,
    /// Yes, No, and Cancel buttons.
    YesNoCancel,
}

impl ReportButtons {
    /// The result of each button, in the order a backend adds them.
    ///
    /// Backends that report the clicked button by position index into this.
    pub fn layout(self) -> &'static [DialogResult] {
        match self {
            Self::Ok => &[DialogResult::Ok],
            Self::OkCancel => &[DialogResult::Ok, DialogResult::Cancel],
            Self::YesNo => &[DialogResult::Yes, DialogResult::No],
            Self::YesNoCancel => &[DialogResult::Yes, DialogResult::No, DialogResult::Cancel],
        }
    }

    /// The button captions, parallel to [`layout`](Self::layout).
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            Self::Ok => &["OK"],
            Self::OkCancel => &["OK", "Cancel"],
            Self::YesNo => &["Yes", "No"],
            Self::YesNoCancel => &["Yes", "No", "Cancel"],
        }
    }
}

// ============================================================================
// Host Contract
// ============================================================================

/// Where a dialog is in its one-shot life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogPhase {
    /// Still collecting configuration; has never run.
    #[default]
    Configured,
    /// A host is running the session right now.
    Shown,
    /// The session ended and the outcome is recorded.
    Resolved,
}

/// What a host hands back when a session ends.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostReply {
    /// How the session ended.
    pub result: DialogResult,
    /// Selected paths, in the order the backend reported them. Empty unless
    /// the result is affirmative.
    pub paths: Vec<PathBuf>,
}

impl HostReply {
    /// A session the user confirmed with the given selection.
    pub fn accepted(paths: Vec<PathBuf>) -> Self {
        Self {
            result: DialogResult::Ok,
            paths,
        }
    }

    /// A session that ended on the given button, with no selection.
    pub fn resolved(result: DialogResult) -> Self {
        Self {
            result,
            paths: Vec::new(),
        }
    }

    /// A session the user backed out of.
    pub fn cancelled() -> Self {
        Self {
            result: DialogResult::Cancel,
            paths: Vec::new(),
        }
    }
}

/// Everything a host needs to run a file browsing session.
#[derive(Debug, Clone, Default)]
pub struct FileDialogRequest {
    /// Shared configuration.
    pub config: DialogConfiguration,
    /// File filters, ignored when selecting directories.
    pub filters: Vec<FileFilter>,
    /// What the session picks.
    pub mode: FileBrowserMode,
    /// Allow selecting more than one entry.
    pub multiple: bool,
    /// Require picked entries to exist. Only meaningful for
    /// [`FileBrowserMode::Open`], and only on backends whose chooser can be
    /// told otherwise.
    pub must_exist: bool,
}

/// Everything a host needs to run a report session.
#[derive(Debug, Clone, Default)]
pub struct ReportRequest {
    /// Shared configuration.
    pub config: DialogConfiguration,
    /// The message shown to the user.
    pub body: String,
    /// Icon next to the message.
    pub icon: DialogIcon,
    /// Which buttons the dialog offers.
    pub buttons: ReportButtons,
}

/// Runs modal sessions on behalf of dialog objects.
///
/// The dialogs own configuration, phase, and outcome; the host only blocks
/// until the user answers. [`NativeHost`] talks to the platform toolkit, and
/// tests or headless deployments substitute their own.
pub trait DialogHost {
    /// Run a file browsing session and block until it ends.
    fn run_file(&mut self, request: &FileDialogRequest) -> HostResult<HostReply>;

    /// Run a report session and block until it ends.
    fn run_report(&mut self, request: &ReportRequest) -> HostResult<HostReply>;
}

/// The host backed by the platform's native toolkit.
#[derive(Debug, Default)]
pub struct NativeHost;

impl DialogHost for NativeHost {
    fn run_file(&mut self, request: &FileDialogRequest) -> HostResult<HostReply> {
        platform::run_file(request)
    }

    fn run_report(&mut self, request: &ReportRequest) -> HostResult<HostReply> {
        platform::run_report(request)
    }
}

/// Check whether the native dialog backend can run on this machine.
pub fn native_backend_available() -> bool {
    platform::is_available()
}

/// Shared session entry: usage checks, resource acquisition, owner linkage.
fn begin_session(
    phase: DialogPhase,
    disposed: bool,
    policy: ReleasePolicy,
    owner: Option<NativeHandle>,
) -> HostResult<DialogLifecycle> {
    if disposed {
        tracing::error!(target: "mullion::dialogs", "show called on a disposed dialog");
        return Err(DialogError::Disposed);
    }
    match phase {
        DialogPhase::Configured => {}
        DialogPhase::Shown => {
            tracing::error!(target: "mullion::dialogs", "show called while a session is running");
            return Err(DialogError::AlreadyShown);
        }
        DialogPhase::Resolved => {
            tracing::error!(target: "mullion::dialogs", "show called on a resolved dialog");
            return Err(DialogError::AlreadyResolved);
        }
    }

    let lifecycle = DialogLifecycle::acquire(policy)?;
    if let Some(owner) = owner {
        let registry = global_registry()?;
        if registry.set_parent(lifecycle.window(), Some(owner)).is_err() {
            tracing::debug!(target: "mullion::dialogs", ?owner, "dialog owner is gone; showing unowned");
        }
    }
    Ok(lifecycle)
}

// ============================================================================
// File Browser Dialog
// ============================================================================

/// Modal dialog for picking one or more files, a save target, or a folder.
///
/// One instance runs one session: configure, show, read the outcome, then
/// dispose (or let drop do it). Showing a resolved or disposed dialog is an
/// error rather than a silent rerun.
///
/// ```no_run
/// use mullion::{DialogResult, FileBrowserDialog};
///
/// let mut dialog = FileBrowserDialog::new();
/// dialog.set_caption("Select archives to restore");
/// dialog.add_filter("Backup Archives", &["bak", "zip"]);
/// dialog.set_multiselect(true);
/// if dialog.show()? == DialogResult::Ok {
///     for path in dialog.file_names() {
///         println!("restoring {}", path.display());
///     }
/// }
/// # Ok::<(), mullion::DialogError>(())
/// ```
#[derive(Debug)]
pub struct FileBrowserDialog {
    config: DialogConfiguration,
    filters: Vec<FileFilter>,
    mode: FileBrowserMode,
    multiple: bool,
    must_exist: bool,
    policy: ReleasePolicy,
    phase: DialogPhase,
    result: DialogResult,
    selected: Vec<PathBuf>,
    lifecycle: Option<DialogLifecycle>,
    disposed: bool,
}

impl FileBrowserDialog {
    /// Create a dialog with default configuration.
    pub fn new() -> Self {
        Self::with_config(DialogConfiguration::default())
    }

    /// Create a dialog from prepared configuration.
    pub fn with_config(config: DialogConfiguration) -> Self {
        Self {
            config,
            filters: Vec::new(),
            mode: FileBrowserMode::Open,
            multiple: false,
            must_exist: true,
            policy: ReleasePolicy::platform_default(),
            phase: DialogPhase::Configured,
            result: DialogResult::None,
            selected: Vec::new(),
            lifecycle: None,
            disposed: false,
        }
    }

    /// Set the dialog caption.
    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.config.caption = Some(caption.into());
    }

    /// Set the owning window.
    pub fn set_owner(&mut self, owner: NativeHandle) {
        self.config.owner = Some(owner);
    }

    /// Set the initial directory.
    pub fn set_initial_directory(&mut self, path: impl Into<PathBuf>) {
        self.config.initial_directory = Some(path.into());
    }

    /// Set what the session picks: files to open, a save target, or a folder.
    pub fn set_mode(&mut self, mode: FileBrowserMode) {
        self.mode = mode;
    }

    /// Allow selecting more than one file.
    pub fn set_multiselect(&mut self, multiple: bool) {
        self.multiple = multiple;
    }

    /// Require picked entries to exist. On by default; only open sessions
    /// honor it.
    pub fn set_must_exist(&mut self, must_exist: bool) {
        self.must_exist = must_exist;
    }

    /// Set the file name a save session suggests.
    pub fn set_default_name(&mut self, name: impl Into<String>) {
        self.config.default_name = Some(name.into());
    }

    /// Override how native resources are released on dispose.
    pub fn set_release_policy(&mut self, policy: ReleasePolicy) {
        self.policy = policy;
    }

    /// Add a file filter, or fold extensions into an existing one.
    ///
    /// Filters are keyed by name and extensions compare without ASCII case,
    /// so repeated setup code cannot pile up duplicates: adding
    /// `("Images", &[".png"])` twice leaves one filter with one extension.
    pub fn add_filter(&mut self, name: impl Into<String>, extensions: &[&str]) {
        let filter = FileFilter::new(name, extensions);
        if let Some(known) = self
            .filters
            .iter_mut()
            .find(|f| f.name.eq_ignore_ascii_case(&filter.name))
        {
            for ext in filter.extensions {
                if !known.extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)) {
                    known.extensions.push(ext);
                }
            }
        } else {
            self.filters.push(filter);
        }
    }

    /// The filters added so far.
    pub fn filters(&self) -> &[FileFilter] {
        &self.filters
    }

    /// Where the dialog is in its life.
    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    /// How the session ended. [`DialogResult::None`] until resolved.
    pub fn result(&self) -> DialogResult {
        self.result
    }

    /// The selected paths, in the order the user picked them. Empty unless
    /// the session ended affirmatively.
    pub fn file_names(&self) -> &[PathBuf] {
        &self.selected
    }

    /// The first selected path, for the common single-selection case.
    pub fn file_name(&self) -> Option<&Path> {
        self.selected.first().map(PathBuf::as_path)
    }

    /// The dialog's window handle while its native resources live.
    pub fn handle(&self) -> Option<NativeHandle> {
        if self.disposed {
            return None;
        }
        self.lifecycle.as_ref().map(|l| l.window())
    }

    /// Run the session through the native backend.
    pub fn show(&mut self) -> HostResult<DialogResult> {
        self.show_with_host(&mut NativeHost)
    }

    /// Run the session through the given host.
    pub fn show_with_host(&mut self, host: &mut dyn DialogHost) -> HostResult<DialogResult> {
        mullion_core::debug_assert_ui_thread!("dialogs run on the UI thread");
        let lifecycle = begin_session(self.phase, self.disposed, self.policy, self.config.owner)?;
        let window = lifecycle.window();
        self.phase = DialogPhase::Shown;

        let request = FileDialogRequest {
            config: self.config.clone(),
            filters: self.filters.clone(),
            mode: self.mode,
            multiple: self.multiple,
            must_exist: self.must_exist,
        };
        tracing::debug!(
            target: "mullion::dialogs",
            ?window,
            mode = ?self.mode,
            multiple = self.multiple,
            filter_count = self.filters.len(),
            "running file browser dialog"
        );

        modal_tracker().push(window);
        let reply = host.run_file(&request);
        modal_tracker().remove(window);

        match reply {
            Ok(reply) => {
                self.selected = if reply.result.is_affirmative() {
                    reply.paths
                } else {
                    Vec::new()
                };
                self.result = reply.result;
                self.phase = DialogPhase::Resolved;
                self.lifecycle = Some(lifecycle);
                Ok(self.result)
            }
            Err(err) => {
                self.phase = DialogPhase::Configured;
                Err(err)
            }
        }
    }

    /// Release the session's native resources.
    ///
    /// Safe to call repeatedly; also runs on drop.
    pub fn dispose(&mut self) -> HostResult<()> {
        if self.disposed {
            return Ok(());
        }
        self.disposed = true;
        if let Some(lifecycle) = self.lifecycle.as_mut() {
            lifecycle.dispose()?;
        }
        Ok(())
    }
}

impl Default for FileBrowserDialog {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Backup Selection Dialog
// ============================================================================

/// Modal dialog for picking the directory a backup set lives in.
///
/// Runs the platform's directory chooser and keeps the chosen directory.
#[derive(Debug)]
pub struct BackupSelectionDialog {
    config: DialogConfiguration,
    policy: ReleasePolicy,
    phase: DialogPhase,
    result: DialogResult,
    selected: Option<PathBuf>,
    lifecycle: Option<DialogLifecycle>,
    disposed: bool,
}

impl BackupSelectionDialog {
    /// Create a dialog with default configuration.
    pub fn new() -> Self {
        Self::with_config(DialogConfiguration::default())
    }

    /// Create a dialog from prepared configuration.
    pub fn with_config(config: DialogConfiguration) -> Self {
        Self {
            config,
            policy: ReleasePolicy::platform_default(),
            phase: DialogPhase::Configured,
            result: DialogResult::None,
            selected: None,
            lifecycle: None,
            disposed: false,
        }
    }

    /// Set the dialog caption.
    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.config.caption = Some(caption.into());
    }

    /// Set the owning window.
    pub fn set_owner(&mut self, owner: NativeHandle) {
        self.config.owner = Some(owner);
    }

    /// Set the directory the chooser starts in.
    pub fn set_initial_directory(&mut self, path: impl Into<PathBuf>) {
        self.config.initial_directory = Some(path.into());
    }

    /// Override how native resources are released on dispose.
    pub fn set_release_policy(&mut self, policy: ReleasePolicy) {
        self.policy = policy;
    }

    /// Where the dialog is in its life.
    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    /// How the session ended. [`DialogResult::None`] until resolved.
    pub fn result(&self) -> DialogResult {
        self.result
    }

    /// The directory the user settled on, once the session ended
    /// affirmatively.
    pub fn selected_backup_directory(&self) -> Option<&Path> {
        self.selected.as_deref()
    }

    /// The dialog's window handle while its native resources live.
    pub fn handle(&self) -> Option<NativeHandle> {
        if self.disposed {
            return None;
        }
        self.lifecycle.as_ref().map(|l| l.window())
    }

    /// Run the session through the native backend.
    pub fn show(&mut self) -> HostResult<DialogResult> {
        self.show_with_host(&mut NativeHost)
    }

    /// Run the session through the given host.
    pub fn show_with_host(&mut self, host: &mut dyn DialogHost) -> HostResult<DialogResult> {
        mullion_core::debug_assert_ui_thread!("dialogs run on the UI thread");
        let lifecycle = begin_session(self.phase, self.disposed, self.policy, self.config.owner)?;
        let window = lifecycle.window();
        self.phase = DialogPhase::Shown;

        let request = FileDialogRequest {
            config: self.config.clone(),
            filters: Vec::new(),
            mode: FileBrowserMode::SelectFolder,
            multiple: false,
            must_exist: true,
        };
        tracing::debug!(target: "mullion::dialogs", ?window, "running backup selection dialog");

        modal_tracker().push(window);
        let reply = host.run_file(&request);
        modal_tracker().remove(window);

        match reply {
            Ok(reply) => {
                self.selected = if reply.result.is_affirmative() {
                    reply.paths.into_iter().next()
                } else {
                    None
                };
                self.result = reply.result;
                self.phase = DialogPhase::Resolved;
                self.lifecycle = Some(lifecycle);
                Ok(self.result)
            }
            Err(err) => {
                self.phase = DialogPhase::Configured;
                Err(err)
            }
        }
    }

    /// Release the session's native resources.
    pub fn dispose(&mut self) -> HostResult<()> {
        if self.disposed {
            return Ok(());
        }
        self.disposed = true;
        if let Some(lifecycle) = self.lifecycle.as_mut() {
            lifecycle.dispose()?;
        }
        Ok(())
    }
}

impl Default for BackupSelectionDialog {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Report Dialog
// ============================================================================

/// Modal dialog that reports a message and waits for a button.
#[derive(Debug)]
pub struct ReportDialog {
    config: DialogConfiguration,
    body: String,
    icon: DialogIcon,
    buttons: ReportButtons,
    policy: ReleasePolicy,
    phase: DialogPhase,
    result: DialogResult,
    lifecycle: Option<DialogLifecycle>,
    disposed: bool,
}

impl ReportDialog {
    /// Create a dialog showing `body`.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            config: DialogConfiguration::default(),
            body: body.into(),
            icon: DialogIcon::None,
            buttons: ReportButtons::Ok,
            policy: ReleasePolicy::platform_default(),
            phase: DialogPhase::Configured,
            result: DialogResult::None,
            lifecycle: None,
            disposed: false,
        }
    }

    /// Set the dialog caption.
    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.config.caption = Some(caption.into());
    }

    /// Set the owning window.
    pub fn set_owner(&mut self, owner: NativeHandle) {
        self.config.owner = Some(owner);
    }

    /// Set the icon shown next to the message.
    pub fn set_icon(&mut self, icon: DialogIcon) {
        self.icon = icon;
    }

    /// Set which buttons the dialog offers.
    pub fn set_buttons(&mut self, buttons: ReportButtons) {
        self.buttons = buttons;
    }

    /// Override how native resources are released on dispose.
    pub fn set_release_policy(&mut self, policy: ReleasePolicy) {
        self.policy = policy;
    }

    /// Where the dialog is in its life.
    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    /// Which button ended the session. [`DialogResult::None`] until resolved.
    pub fn result(&self) -> DialogResult {
        self.result
    }

    /// The dialog's window handle while its native resources live.
    pub fn handle(&self) -> Option<NativeHandle> {
        if self.disposed {
            return None;
        }
        self.lifecycle.as_ref().map(|l| l.window())
    }

    /// Run the session through the native backend.
    pub fn show(&mut self) -> HostResult<DialogResult> {
        self.show_with_host(&mut NativeHost)
    }

    /// Run the session through the given host.
    pub fn show_with_host(&mut self, host: &mut dyn DialogHost) -> HostResult<DialogResult> {
        mullion_core::debug_assert_ui_thread!("dialogs run on the UI thread");
        let lifecycle = begin_session(self.phase, self.disposed, self.policy, self.config.owner)?;
        let window = lifecycle.window();
        self.phase = DialogPhase::Shown;

        let request = ReportRequest {
            config: self.config.clone(),
            body: self.body.clone(),
            icon: self.icon,
            buttons: self.buttons,
        };
        tracing::debug!(
            target: "mullion::dialogs",
            ?window,
            icon = ?self.icon,
            buttons = ?self.buttons,
            "running report dialog"
        );

        modal_tracker().push(window);
        let reply = host.run_report(&request);
        modal_tracker().remove(window);

        match reply {
            Ok(reply) => {
                // Report sessions never carry a selection.
                self.result = reply.result;
                self.phase = DialogPhase::Resolved;
                self.lifecycle = Some(lifecycle);
                Ok(self.result)
            }
            Err(err) => {
                self.phase = DialogPhase::Configured;
                Err(err)
            }
        }
    }

    /// Release the session's native resources.
    pub fn dispose(&mut self) -> HostResult<()> {
        if self.disposed {
            return Ok(());
        }
        self.disposed = true;
        if let Some(lifecycle) = self.lifecycle.as_mut() {
            lifecycle.dispose()?;
        }
        Ok(())
    }
}

static_assertions::assert_impl_all!(FileBrowserDialog: Send, Sync);
static_assertions::assert_impl_all!(BackupSelectionDialog: Send, Sync);
static_assertions::assert_impl_all!(ReportDialog: Send, Sync);

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use mullion_core::{
        AttachedValue, DATA_CONTEXT_KEY, HandleKind, HandleRegistry, HostBase, PropertyHost,
        init_global_registry,
    };

    /// Host that replays a scripted reply and records what it was asked.
    struct ScriptedHost {
        reply: Option<HostResult<HostReply>>,
        seen_file: Vec<FileDialogRequest>,
        seen_report: Vec<ReportRequest>,
        during: Option<Box<dyn FnMut()>>,
    }

    impl ScriptedHost {
        fn replying(reply: HostReply) -> Self {
            Self {
                reply: Some(Ok(reply)),
                seen_file: Vec::new(),
                seen_report: Vec::new(),
                during: None,
            }
        }

        fn failing(err: DialogError) -> Self {
            Self {
                reply: Some(Err(err)),
                seen_file: Vec::new(),
                seen_report: Vec::new(),
                during: None,
            }
        }

        fn observing(mut self, f: impl FnMut() + 'static) -> Self {
            self.during = Some(Box::new(f));
            self
        }

        fn take_reply(&mut self) -> HostResult<HostReply> {
            if let Some(f) = self.during.as_mut() {
                f();
            }
            self.reply.take().expect("scripted reply already consumed")
        }
    }

    impl DialogHost for ScriptedHost {
        fn run_file(&mut self, request: &FileDialogRequest) -> HostResult<HostReply> {
            self.seen_file.push(request.clone());
            self.take_reply()
        }

        fn run_report(&mut self, request: &ReportRequest) -> HostResult<HostReply> {
            self.seen_report.push(request.clone());
            self.take_reply()
        }
    }

    #[test]
    fn test_file_filter_creation() {
        let filter = FileFilter::new("Backup Archives", &["bak", "zip", "tar"]);
        assert_eq!(filter.name, "Backup Archives");
        assert_eq!(filter.extensions, vec!["bak", "zip", "tar"]);
    }

    #[test]
    fn test_file_filter_all_files() {
        let filter = FileFilter::all_files();
        assert_eq!(filter.name, "All Files");
        assert_eq!(filter.extensions, vec!["*"]);
    }

    #[test]
    fn test_filter_patterns() {
        assert_eq!(
            FileFilter::new("Reports", &["csv", "tsv"]).pattern(),
            "*.csv;*.tsv"
        );
        assert_eq!(FileFilter::all_files().pattern(), "*.*");
    }

    #[test]
    fn test_configuration_builder() {
        let mut registry = HandleRegistry::new();
        let owner = registry.register(HandleKind::Window);

        let config = DialogConfiguration::with_caption("Restore backup")
            .owner(owner)
            .initial_directory("/srv/backups");
        assert_eq!(config.caption.as_deref(), Some("Restore backup"));
        assert_eq!(config.owner, Some(owner));
        assert_eq!(config.initial_directory, Some(PathBuf::from("/srv/backups")));
    }

    #[test]
    fn test_button_layouts_match_labels() {
        for buttons in [
            ReportButtons::Ok,
            ReportButtons::OkCancel,
            ReportButtons::YesNo,
            ReportButtons::YesNoCancel,
        ] {
            assert_eq!(buttons.layout().len(), buttons.labels().len());
        }
        assert_eq!(
            ReportButtons::YesNoCancel.layout(),
            &[DialogResult::Yes, DialogResult::No, DialogResult::Cancel]
        );
        assert_eq!(ReportButtons::OkCancel.labels(), &["OK", "Cancel"]);
    }

    #[test]
    fn test_add_filter_is_idempotent() {
        let mut dialog = FileBrowserDialog::new();
        dialog.add_filter("Images", &[".png"]);
        dialog.add_filter("Images", &[".png"]);
        assert_eq!(dialog.filters().len(), 1);
        assert_eq!(dialog.filters()[0].extensions, vec!["png"]);
    }

    #[test]
    fn test_add_filter_merges_extensions_by_name() {
        let mut dialog = FileBrowserDialog::new();
        dialog.add_filter("Log Files", &["log"]);
        dialog.add_filter("log files", &["LOG", "txt"]);
        assert_eq!(dialog.filters().len(), 1);
        assert_eq!(dialog.filters()[0].name, "Log Files");
        assert_eq!(dialog.filters()[0].extensions, vec!["log", "txt"]);

        dialog.add_filter("Archives", &["zip"]);
        assert_eq!(dialog.filters().len(), 2);
    }

    #[test]
    fn test_selection_preserves_host_order() {
        init_global_registry();
        let mut dialog = FileBrowserDialog::new();
        dialog.set_release_policy(ReleasePolicy::Full);
        dialog.set_multiselect(true);

        let mut host = ScriptedHost::replying(HostReply::accepted(vec![
            PathBuf::from("/tmp/b.csv"),
            PathBuf::from("/tmp/a.csv"),
        ]));
        let result = dialog.show_with_host(&mut host).unwrap();

        assert_eq!(result, DialogResult::Ok);
        assert_eq!(dialog.phase(), DialogPhase::Resolved);
        assert_eq!(
            dialog.file_names(),
            &[PathBuf::from("/tmp/b.csv"), PathBuf::from("/tmp/a.csv")]
        );
        assert_eq!(dialog.file_name(), Some(Path::new("/tmp/b.csv")));
    }

    #[test]
    fn test_cancel_discards_reported_paths() {
        init_global_registry();
        let mut dialog = FileBrowserDialog::new();
        dialog.set_release_policy(ReleasePolicy::Full);

        // A confused backend may hand paths back with a cancel; they are dropped.
        let mut host = ScriptedHost::replying(HostReply {
            result: DialogResult::Cancel,
            paths: vec![PathBuf::from("/tmp/z.csv")],
        });
        let result = dialog.show_with_host(&mut host).unwrap();

        assert_eq!(result, DialogResult::Cancel);
        assert!(dialog.file_names().is_empty());
        assert_eq!(dialog.file_name(), None);
        assert_eq!(dialog.phase(), DialogPhase::Resolved);
    }

    #[test]
    fn test_file_request_carries_configuration() {
        init_global_registry();
        let mut dialog = FileBrowserDialog::new();
        dialog.set_release_policy(ReleasePolicy::Full);
        dialog.set_caption("Choose exports");
        dialog.set_initial_directory("/var/exports");
        dialog.set_multiselect(true);
        dialog.add_filter("Reports", &["csv", "tsv"]);

        let mut host = ScriptedHost::replying(HostReply::cancelled());
        dialog.show_with_host(&mut host).unwrap();

        let request = &host.seen_file[0];
        assert_eq!(request.config.caption.as_deref(), Some("Choose exports"));
        assert_eq!(
            request.config.initial_directory,
            Some(PathBuf::from("/var/exports"))
        );
        assert_eq!(request.mode, FileBrowserMode::Open);
        assert!(request.multiple);
        assert!(request.must_exist);
        assert_eq!(request.filters.len(), 1);
    }

    #[test]
    fn test_save_request_carries_default_name() {
        init_global_registry();
        let mut dialog = FileBrowserDialog::new();
        dialog.set_release_policy(ReleasePolicy::Full);
        dialog.set_mode(FileBrowserMode::Save);
        dialog.set_default_name("export.csv");
        dialog.set_must_exist(false);

        let mut host = ScriptedHost::replying(HostReply::accepted(vec![PathBuf::from(
            "/home/user/export.csv",
        )]));
        let result = dialog.show_with_host(&mut host).unwrap();

        assert_eq!(result, DialogResult::Ok);
        assert_eq!(dialog.file_name(), Some(Path::new("/home/user/export.csv")));

        let request = &host.seen_file[0];
        assert_eq!(request.mode, FileBrowserMode::Save);
        assert!(!request.must_exist);
        assert_eq!(request.config.default_name.as_deref(), Some("export.csv"));
    }

    #[test]
    fn test_second_show_reports_resolved() {
        init_global_registry();
        let mut dialog = FileBrowserDialog::new();
        dialog.set_release_policy(ReleasePolicy::Full);

        let mut host = ScriptedHost::replying(HostReply::cancelled());
        dialog.show_with_host(&mut host).unwrap();

        let mut again = ScriptedHost::replying(HostReply::cancelled());
        let err = dialog.show_with_host(&mut again).unwrap_err();
        assert!(matches!(err, DialogError::AlreadyResolved));
        assert!(again.seen_file.is_empty());
    }

    #[test]
    fn test_show_while_shown_is_rejected() {
        init_global_registry();
        // A reentrant show would reach begin_session with the phase already
        // Shown; it must bounce before touching native resources.
        let err = begin_session(DialogPhase::Shown, false, ReleasePolicy::Full, None).unwrap_err();
        assert!(matches!(err, DialogError::AlreadyShown));
    }

    #[test]
    fn test_failed_host_leaves_dialog_reusable() {
        init_global_registry();
        let mut dialog = FileBrowserDialog::new();
        dialog.set_release_policy(ReleasePolicy::Full);

        let mut failing = ScriptedHost::failing(DialogError::BackendUnavailable {
            reason: "no portal".into(),
        });
        let err = dialog.show_with_host(&mut failing).unwrap_err();
        assert!(matches!(err, DialogError::BackendUnavailable { .. }));
        assert_eq!(dialog.phase(), DialogPhase::Configured);
        assert!(dialog.handle().is_none());

        let mut working = ScriptedHost::replying(HostReply::accepted(vec![PathBuf::from(
            "/tmp/retry.csv",
        )]));
        assert_eq!(
            dialog.show_with_host(&mut working).unwrap(),
            DialogResult::Ok
        );
    }

    #[test]
    fn test_modal_stack_tracks_session() {
        init_global_registry();
        let mut dialog = FileBrowserDialog::new();
        dialog.set_release_policy(ReleasePolicy::Full);

        let mut host =
            ScriptedHost::replying(HostReply::accepted(vec![PathBuf::from("/tmp/x.csv")]))
                .observing(|| assert!(modal_tracker().is_blocked()));
        dialog.show_with_host(&mut host).unwrap();

        let window = dialog.handle().unwrap();
        assert!(!modal_tracker().contains(window));
    }

    #[test]
    fn test_modal_stack_clears_on_host_failure() {
        init_global_registry();
        let mut dialog = ReportDialog::new("Backend check");
        dialog.set_release_policy(ReleasePolicy::Full);

        let mut host = ScriptedHost::failing(DialogError::BackendUnavailable {
            reason: "headless".into(),
        });
        dialog.show_with_host(&mut host).unwrap_err();
        // The session's entry is gone even though the handle is too.
        assert_eq!(dialog.handle(), None);
        assert_eq!(dialog.phase(), DialogPhase::Configured);
    }

    #[test]
    fn test_dispose_releases_native_resources() {
        init_global_registry();
        let registry = global_registry().unwrap();
        let mut dialog = FileBrowserDialog::new();
        dialog.set_release_policy(ReleasePolicy::Full);

        let mut host =
            ScriptedHost::replying(HostReply::accepted(vec![PathBuf::from("/tmp/f.csv")]));
        dialog.show_with_host(&mut host).unwrap();
        let window = dialog.handle().unwrap();
        assert!(registry.contains(window));

        dialog.dispose().unwrap();
        assert!(dialog.handle().is_none());
        assert!(!registry.contains(window));
        dialog.dispose().unwrap();

        let mut again = ScriptedHost::replying(HostReply::cancelled());
        let err = dialog.show_with_host(&mut again).unwrap_err();
        assert!(matches!(err, DialogError::Disposed));
    }

    #[test]
    fn test_skip_final_release_keeps_window_entry() {
        init_global_registry();
        let registry = global_registry().unwrap();
        let mut dialog = ReportDialog::new("Backup finished");
        dialog.set_release_policy(ReleasePolicy::SkipFinalRelease);

        let mut host = ScriptedHost::replying(HostReply::resolved(DialogResult::Ok));
        dialog.show_with_host(&mut host).unwrap();
        let window = dialog.handle().unwrap();

        dialog.dispose().unwrap();
        assert!(dialog.handle().is_none());
        assert!(registry.contains(window));
    }

    #[test]
    fn test_report_dialog_resolves_button_choice() {
        init_global_registry();
        let mut dialog = ReportDialog::new("Delete 4 backups?");
        dialog.set_caption("Confirm");
        dialog.set_icon(DialogIcon::Question);
        dialog.set_buttons(ReportButtons::YesNo);
        dialog.set_release_policy(ReleasePolicy::Full);

        let mut host = ScriptedHost::replying(HostReply::resolved(DialogResult::Yes));
        let result = dialog.show_with_host(&mut host).unwrap();

        assert_eq!(result, DialogResult::Yes);
        assert!(dialog.result().is_affirmative());

        let request = &host.seen_report[0];
        assert_eq!(request.body, "Delete 4 backups?");
        assert_eq!(request.config.caption.as_deref(), Some("Confirm"));
        assert_eq!(request.icon, DialogIcon::Question);
        assert_eq!(request.buttons, ReportButtons::YesNo);
    }

    #[test]
    fn test_backup_selection_keeps_directory() {
        init_global_registry();
        let mut dialog = BackupSelectionDialog::new();
        dialog.set_release_policy(ReleasePolicy::Full);
        dialog.set_caption("Pick the backup set");

        let mut host = ScriptedHost::replying(HostReply::accepted(vec![PathBuf::from(
            "/srv/backups/nightly",
        )]));
        let result = dialog.show_with_host(&mut host).unwrap();

        assert_eq!(result, DialogResult::Ok);
        assert_eq!(
            dialog.selected_backup_directory(),
            Some(Path::new("/srv/backups/nightly"))
        );

        let request = &host.seen_file[0];
        assert_eq!(request.mode, FileBrowserMode::SelectFolder);
        assert!(!request.multiple);
        assert!(request.filters.is_empty());
    }

    #[test]
    fn test_backup_selection_cancel_keeps_nothing() {
        init_global_registry();
        let mut dialog = BackupSelectionDialog::new();
        dialog.set_release_policy(ReleasePolicy::Full);

        let mut host = ScriptedHost::replying(HostReply::cancelled());
        let result = dialog.show_with_host(&mut host).unwrap();

        assert_eq!(result, DialogResult::Cancel);
        assert_eq!(dialog.selected_backup_directory(), None);
    }

    #[test]
    fn test_data_context_resolves_through_owner() {
        init_global_registry();
        let owner = HostBase::new(HandleKind::Window);
        let context: AttachedValue = Arc::new(String::from("backups-view-model"));
        owner.set_data_context(Some(context.clone())).unwrap();

        let mut dialog = FileBrowserDialog::new();
        dialog.set_release_policy(ReleasePolicy::Full);
        dialog.set_owner(owner.handle());

        let mut host =
            ScriptedHost::replying(HostReply::accepted(vec![PathBuf::from("/tmp/a.csv")]));
        dialog.show_with_host(&mut host).unwrap();

        let window = dialog.handle().unwrap();
        let resolved = global_registry()
            .unwrap()
            .resolve_value(window, DATA_CONTEXT_KEY)
            .unwrap()
            .unwrap();
        assert_eq!(resolved.owner, owner.handle());
        assert!(Arc::ptr_eq(&resolved.value, &context));
    }

    #[test]
    fn test_availability_check() {
        // This should not panic regardless of platform
        let _ = native_backend_available();
    }
}
