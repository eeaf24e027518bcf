pub mod fake_youtube;
