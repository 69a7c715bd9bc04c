//! Native demo host.
//!
//! Generates a 120 BPM main clock and a slightly detuned external clock,
//! feeds both through the sync engine with run and sync enabled, and renders
//! the subdivided clock output as audible clicks.

use anyhow::Context;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Sample, SampleFormat, SizedSample, StreamConfig};
use dasp_sample::FromSample;
use std::time::Duration;

use clock_sync::{ClockSyncEngine, EngineInputs, Ppqn};

const MAIN_BPM: f32 = 120.0;
const EXTERNAL_BPM: f32 = 121.0;
const CLICK_GAIN: f32 = 0.03;

struct ClickRenderer {
    engine: ClockSyncEngine,
    sample_rate: f32,
    sample_index: u64,
    main_period: u64,
    external_period: u64,
    controls_sent: bool,
}

impl ClickRenderer {
    fn new(sample_rate: f32) -> Self {
        let mut engine = ClockSyncEngine::new(sample_rate);
        engine.set_ppqn(Ppqn::P24);
        Self {
            engine,
            sample_rate,
            sample_index: 0,
            main_period: (sample_rate * 60.0 / MAIN_BPM) as u64,
            external_period: (sample_rate * 60.0 / EXTERNAL_BPM) as u64,
            controls_sent: false,
        }
    }

    fn next_sample(&mut self) -> f32 {
        // Latch run and sync once by holding the buttons for the first
        // sample only.
        let button = if self.controls_sent { 0.0 } else { 10.0 };
        self.controls_sent = true;

        let main_clock = if self.sample_index % self.main_period == 0 {
            10.0
        } else {
            0.0
        };
        let external_clock = if self.sample_index % self.external_period == 0 {
            10.0
        } else {
            0.0
        };
        self.sample_index += 1;

        let outputs = self.engine.process(&EngineInputs {
            run_button: button,
            sync_button: button,
            threshold_knob: 0.05,
            main_clock,
            external_clock,
            ..Default::default()
        });

        outputs.clock_out * CLICK_GAIN
    }

    fn process_block(&mut self, output: &mut [f32]) {
        for sample in output.iter_mut() {
            *sample = self.next_sample();
        }
    }

    fn bpm_report(&self) -> (f32, f32, f32) {
        (
            self.engine.main_timing().beats_per_minute,
            self.engine.external_timing().beats_per_minute,
            self.engine.sync_status().error,
        )
    }
}

fn build_stream<T>(
    device: cpal::Device,
    config: StreamConfig,
    mut renderer: ClickRenderer,
    report: std::sync::mpsc::Sender<(f32, f32, f32)>,
) -> anyhow::Result<cpal::Stream>
where
    T: Sample + SizedSample + FromSample<f32>,
{
    let channels = config.channels as usize;
    let mut mono = Vec::new();
    let mut blocks = 0u64;

    let stream = device
        .build_output_stream(
            &config,
            move |data: &mut [T], _| {
                let frames = data.len() / channels;
                mono.resize(frames, 0.0);
                renderer.process_block(&mut mono);

                for (frame, value) in data.chunks_mut(channels).zip(mono.iter()) {
                    for channel in frame.iter_mut() {
                        *channel = T::from_sample::<f32>(*value);
                    }
                }

                blocks += 1;
                if blocks % 50 == 0 {
                    let _ = report.send(renderer.bpm_report());
                }
            },
            move |err| {
                eprintln!("Stream error: {}", err);
            },
            None,
        )
        .context("failed to build stream")?;

    Ok(stream)
}

fn main() -> anyhow::Result<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .context("no default output device")?;
    let supported = device
        .default_output_config()
        .context("failed to query default output config")?;
    let sample_format = supported.sample_format();
    let config: StreamConfig = supported.config();
    let sample_rate = config.sample_rate.0 as f32;

    println!(
        "Device: '{}', {} Hz, {} channels",
        device.name().unwrap_or_else(|_| "unknown".into()),
        sample_rate,
        config.channels
    );
    println!(
        "Main clock {} BPM, external clock {} BPM, 24 PPQN output",
        MAIN_BPM, EXTERNAL_BPM
    );

    let renderer = ClickRenderer::new(sample_rate);
    let (tx, rx) = std::sync::mpsc::channel();

    let stream = match sample_format {
        SampleFormat::F32 => build_stream::<f32>(device, config, renderer, tx)?,
        SampleFormat::I16 => build_stream::<i16>(device, config, renderer, tx)?,
        SampleFormat::U16 => build_stream::<u16>(device, config, renderer, tx)?,
        other => anyhow::bail!("unsupported sample format: {:?}", other),
    };
    stream.play().context("failed to start stream")?;

    println!("Playing. Press Ctrl+C to stop.\n");
    loop {
        if let Ok((main_bpm, ext_bpm, error)) = rx.recv_timeout(Duration::from_secs(2)) {
            println!(
                "main {:6.2} BPM | external {:6.2} BPM | phase error {:.3}",
                main_bpm, ext_bpm, error
            );
        }
    }
}
