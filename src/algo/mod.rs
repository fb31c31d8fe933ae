pub mod epsilon_greedy;
pub mod exp3;
pub mod explore_commit;
pub mod fpl;
pub mod ucb;

pub use epsilon_greedy::{EpsilonGreedyAgent, EpsilonGreedyAgentConfig};
pub use exp3::{Exp3Agent, Exp3AgentConfig};
pub use explore_commit::{ExploreCommitAgent, ExploreCommitAgentConfig};
pub use fpl::{FplAgent, FplAgentConfig};
pub use ucb::{UcbAgent, UcbAgentConfig};
