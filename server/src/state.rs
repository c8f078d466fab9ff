use std::sync::Arc;
use utility::env::Variables;
use crate::util::ConfigState;

pub type SharedState = Arc<State>;

pub struct State {
	pub env: Variables,
	pub config: ConfigState,
}

impl State {
	pub fn init(env: Variables) -> Self {
		Self { env: env.clone(), config: ConfigState::from(env) }
	}
}
