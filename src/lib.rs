//! Synchronized Views over Observable Lists
//!
//! A *source* list routes every mutation as a fine-grained *structural event*
//! (add, remove, replace, move, reset). *Views* derived from it keep their own
//! copy of the data and apply each event incrementally, then route the
//! equivalent event to the views derived from them in turn.
//!
//! * a *couple view* holds `(value, projection)` pairs and can be filtered,
//!   reversed or kept sorted,
//! * a *single view* mirrors only the projections of a couple view,
//! * *notify views* and *list adapters* turn routed events into
//!   collection-changed and property-changed notifications.
//!
//! Propagation is synchronous: all dependent views are up to date when the
//! mutating call returns, and any error they raise is returned by that call.
//!
//!# Examples
//!
//! ```
//! use r3vi_sync::{
//!     buffer::vec::ObservableVec,
//!     view::{CoupleViewExt, ObservableExt, RoutedView},
//! };
//!
//! let source = ObservableVec::new();
//! source.add(3).unwrap();
//!
//! let sorted = source
//!     .to_sorted_couple_view(|x: &i32| *x, |x: &i32| x * 10, |a: &i32, b: &i32| a.cmp(b))
//!     .unwrap();
//! let projections = sorted.to_single_view().unwrap();
//!
//! source.add(5).unwrap();
//! source.add(1).unwrap();
//!
//! assert_eq!(projections.to_vec(), vec![10, 30, 50]);
//!
//! source.remove(&3).unwrap();
//! assert_eq!(projections.to_vec(), vec![10, 50]);
//!
//! // disposing the single view disposes the sorted view behind it
//! projections.dispose();
//! assert!(sorted.is_disposed());
//! ```

pub mod error;
pub mod view;
pub mod buffer;
pub mod projection;
