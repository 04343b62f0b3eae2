pub mod assignment;
pub mod stats;
pub mod sample;
pub mod cards;
pub mod view;
pub mod session;

pub use assignment::Bucket;
pub use cards::{CardChart, CardKey, SampleKey};
pub use session::{Command, GameSession};
pub use view::GameView;
