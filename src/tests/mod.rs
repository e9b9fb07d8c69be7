pub mod fake_emitter;
