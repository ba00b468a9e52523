//! Game variants beyond community-card hold'em.

pub mod draw;
