// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod actions;
pub mod catalog;
pub mod forms;
pub mod ids;
pub mod import;
pub mod model;
pub mod runtime;
pub mod state;
pub mod widget;

pub use actions::*;
pub use catalog::*;
pub use forms::*;
pub use ids::*;
pub use import::*;
pub use model::*;
pub use runtime::*;
pub use state::*;
pub use widget::*;
