mod resampler_config;

pub use resampler_config::ResamplerConfig;
