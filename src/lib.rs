//! Playback view runtime for media player frontends.
//!
//! This crate sits between a long-running playback engine and a hosting
//! UI. It keeps the displayed playback state consistent under concurrent,
//! possibly out-of-order engine notifications, drives the elapsed-time
//! refresh loop for a seek control, and executes deferred playlist and
//! delete tasks on an ordered background worker.
//!
//! Components communicate over a `tokio::sync::broadcast` bus carrying
//! [`protocol::Message`] envelopes. The embedding application implements
//! three seams and hands them in at construction:
//!
//! - [`engine::PlaybackEngine`] — the playback engine handle,
//! - [`store::PlaylistStore`] — the persistent playlist store,
//! - [`view::PlaybackStateView`] — the notification sink the UI binds.
//!
//! [`playback_view_manager::PlaybackViewManager`] runs the UI-affinity
//! loop (state gate, progress refreshes, gesture routing) on one thread;
//! [`task_dispatcher::TaskDispatcher`] drains the ordered task queue on
//! another. Both are spawned by the embedding application and stop when
//! their channels close.

pub mod action;
pub mod config;
pub mod engine;
pub mod playback_view_manager;
pub mod progress_scheduler;
pub mod protocol;
pub mod state;
pub mod state_clock;
pub mod store;
pub mod task_dispatcher;
pub mod view;
