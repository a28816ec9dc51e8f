//! Drift detection between the albums view and the catalog / access-control sources.
//!
//! A reconciliation pass recomputes the album sizes of one owner the same way the
//! projector does, but hands them to a [`DriftDetector`] instead of the view store.
//! The detector diffs them against the stored rows and notifies its observers: the
//! [`DriftLogger`] always, and a [`DriftSynchronizer`] only when corrections are asked for.

pub mod detector;
pub mod drift;
pub mod observer;
pub mod reconciler;

pub use detector::DriftDetector;
pub use drift::{Drift, DriftKind, DriftObserver};
pub use observer::{DriftLogger, DriftSynchronizer};
pub use reconciler::{OwnerDriftReconciler, ReconcilerBuilder};
