//! Unit test modules.

mod bonus_test;
mod challenge_test;
mod levels_test;
mod notification_test;
mod xp_grant_test;
