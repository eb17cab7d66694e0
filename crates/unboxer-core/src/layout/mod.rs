//! Output layout: root analysis, planning and move application.
//!
//! The three steps are separate so the decision can be inspected without
//! touching the filesystem output (`unboxer inspect`).

pub mod apply;
pub mod plan;
pub mod roots;

pub use apply::apply_plan;
pub use plan::LayoutKind;
pub use plan::LayoutPlan;
pub use plan::MoveOp;
pub use plan::plan_layout;
pub use plan::predict_layout;
pub use roots::RootDiscovery;
pub use roots::RootItemSet;
pub use roots::analyze_roots;
