//! Audio system using Web Audio API
//!
//! Procedurally generated cues and music - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::drone_gains;
use crate::settings::Settings;
use crate::shell::{AudioCue, Cue, Track};

/// Nodes making up the looping background track
struct MusicNodes {
    oscillators: Vec<OscillatorNode>,
    gain: GainNode,
    /// LFO depth feeding `gain`'s gain param
    swell: GainNode,
}

impl MusicNodes {
    fn set_gains(&self, settings: &Settings) {
        let (base, swell) = drone_gains(settings);
        self.gain.gain().set_value(base);
        self.swell.gain().set_value(swell);
    }

    fn stop(&self) {
        for osc in &self.oscillators {
            osc.stop().ok();
        }
        self.gain.disconnect().ok();
    }
}

/// Web Audio backend
pub struct WebAudio {
    ctx: Option<AudioContext>,
    settings: Settings,
    music: Option<MusicNodes>,
}

impl WebAudio {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            settings: settings.clone(),
            music: None,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Apply new volume settings, including to music already playing
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.settings = settings.clone();
        if let Some(music) = &self.music {
            music.set_gains(&self.settings);
        }
    }

    /// Create an oscillator routed through its own gain node to the destination
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Boing - springy upward chirp that settles back down
    fn play_boing(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(660.0, t + 0.06)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(330.0, t + 0.25)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.32).ok();
    }

    /// Arrgh - harsh falling growl
    fn play_arrgh(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.7)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(90.0, t + 0.6)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.75).ok();
        }

        // Low grit underneath
        if let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                .ok();
            osc.frequency().set_value_at_time(150.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(50.0, t + 0.5)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.55).ok();
        }
    }

    /// Background drone: an open fifth with a slow swell
    fn start_background(&self, ctx: &AudioContext) -> Option<MusicNodes> {
        let gain = ctx.create_gain().ok()?;
        let swell = ctx.create_gain().ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        let mut music = MusicNodes {
            oscillators: Vec::with_capacity(3),
            gain,
            swell,
        };
        music.set_gains(&self.settings);

        if Self::wire_background(ctx, &mut music).is_none() {
            // Stop whatever started before the failure
            music.stop();
            return None;
        }
        Some(music)
    }

    fn wire_background(ctx: &AudioContext, music: &mut MusicNodes) -> Option<()> {
        for freq in [110.0, 164.81] {
            let osc = ctx.create_oscillator().ok()?;
            osc.set_type(OscillatorType::Triangle);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&music.gain).ok()?;
            osc.start().ok()?;
            music.oscillators.push(osc);
        }

        // LFO modulating the music gain
        let lfo = ctx.create_oscillator().ok()?;
        lfo.frequency().set_value(0.25);
        lfo.connect_with_audio_node(&music.swell).ok()?;
        music.swell.connect_with_audio_param(&music.gain.gain()).ok()?;
        lfo.start().ok()?;
        music.oscillators.push(lfo);

        Some(())
    }
}

impl AudioCue for WebAudio {
    fn play(&mut self, cue: Cue) {
        let vol = self.settings.cue_volume(cue);
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            Cue::Boing => self.play_boing(ctx, vol),
            Cue::Arrgh => self.play_arrgh(ctx, vol),
        }
    }

    fn loop_music(&mut self, track: Track) {
        self.stop_music();
        let Some(ctx) = &self.ctx else { return };

        self.music = match track {
            Track::Background => self.start_background(ctx),
        };
        if self.music.is_none() {
            log::warn!("Failed to start {:?} music", track);
        }
    }

    fn stop_music(&mut self) {
        if let Some(music) = self.music.take() {
            music.stop();
        }
    }
}
