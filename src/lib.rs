// Module layout (Clean Architecture style)
// - bootstrap: configuration and wiring
// - infrastructure: key-value storage, spreadsheet fetching, permission adapters
// - presentation: HTTP handlers and routing
// - application: normalization, filtering, report progress and use cases
// - domain: document register, status vocabulary, aggregates, meetings

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
