//! One dialog, menu, and widget-state contract over three native toolkits.
//!
//! Mullion wraps AppKit, Win32, and the XDG Desktop Portal behind a single
//! API so application code can open dialogs, track menu items, and hang
//! shared state off native widgets without caring which toolkit is
//! underneath:
//!
//! - **Dialogs**: file browsing, backup-set selection, and report dialogs
//!   with one modal lifecycle and a swappable host for headless runs
//! - **Platform Adapters**: conversions between toolkit constants and the
//!   portable enums, with documented substitutions where a toolkit lacks a
//!   value
//! - **Menu Items**: copyable wrappers over registered native menu handles
//! - **Modal Tracking**: a process-wide stack of windows blocked by modal
//!   sessions
//! - **Lifecycle**: ordered acquire/dispose of the native resources behind a
//!   dialog session
//!
//! The platform-independent half (handle registry, attached values, data
//! context, dispatch) lives in [`mullion_core`] and is re-exported here.
//!
//! # Configuring a File Dialog
//!
//! ```
//! use mullion::{DialogConfiguration, FileFilter};
//!
//! let config = DialogConfiguration::with_caption("Restore backup")
//!     .initial_directory("/srv/backups");
//! assert_eq!(config.caption.as_deref(), Some("Restore backup"));
//!
//! let filter = FileFilter::new("Backup Archives", &["bak", "zip"]);
//! assert_eq!(filter.pattern(), "*.bak;*.zip");
//! ```
//!
//! # Running a Report Dialog
//!
//! ```no_run
//! use mullion::{DialogIcon, ReportButtons, ReportDialog, init_global_registry, mark_ui_thread};
//!
//! init_global_registry();
//! mark_ui_thread();
//!
//! let mut dialog = ReportDialog::new("3 archives are older than the retention window.");
//! dialog.set_caption("Retention check");
//! dialog.set_icon(DialogIcon::Exclamation);
//! dialog.set_buttons(ReportButtons::OkCancel);
//!
//! let result = dialog.show()?;
//! println!("operator chose {:?}", result);
//! # Ok::<(), mullion::DialogError>(())
//! ```

pub mod dialogs;
pub mod enums;
pub mod error;
pub mod lifecycle;
pub mod menu_item;
pub mod modal;
pub mod platform;

pub use mullion_core::*;

pub use dialogs::{
    BackupSelectionDialog, DialogConfiguration, DialogHost, DialogPhase, FileBrowserDialog,
    FileBrowserMode, FileDialogRequest, FileFilter, HostReply, NativeHost, ReportButtons,
    ReportDialog, ReportRequest, native_backend_available,
};
pub use enums::{DialogIcon, DialogResult, TextWrapping, WindowState};
pub use error::{DialogError, HostResult};
pub use lifecycle::{DialogLifecycle, ReleasePolicy};
pub use menu_item::OsMenuItem;
pub use modal::{ModalTracker, modal_tracker};
