mod attempt;
mod ids;
mod question;
mod skill;
mod user;

pub use attempt::{Attempt, parse_score};
pub use ids::{AttemptId, ParseIdError, QuestionId, SkillId, UserId};
pub use question::{Difficulty, Question, QuestionError};
pub use skill::{Skill, SkillError};
pub use user::{DEMO_EMAIL, DEMO_USERNAME, Identity, User};
