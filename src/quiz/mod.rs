//! Quiz flow: contact form models, wizard stages, and the session reducer.

pub mod model;
pub mod session;
pub mod stage;

pub use model::{AgeBracket, ContactInfo, Experience};
pub use session::{Action, Session};
pub use stage::{Stage, View};
