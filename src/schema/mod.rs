pub mod calendar;
pub mod fragment;
pub mod npc;
pub mod race;
