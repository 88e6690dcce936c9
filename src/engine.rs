//! The per-block processor: controllers in, cursor moves, effect morphs.

/*
Signal Flow
===========

    L ─┬───────────────────────────────────────────────┬──▶ dry
    R ─┤                                               │
       │ mono = ½(L+R)                                 │
       ▼                                               │
   ┌────────┐ bands ┌───────┐ speed,spin ┌────────┐    │
   │BandSplit├──────▶│ Drift ├───────────▶│ Cursor │    │
   └────────┘       └───────┘            └───┬────┘    │
                                             │ (x,y)    │
                                             ▼          │
                                       ┌──────────┐     │
                            grid ─────▶│ bilinear │     │
                                       └────┬─────┘     │
                                            │ params    ▼
                                       ┌────▼─────┐  ┌───────┐
                                       │  effect  ├─▶│ fader ├──▶ out
                                       └──────────┘  └───────┘

While listening (cursor overridden from outside) the top half stops: no
band filtering, no drift, no integration. The cursor holds wherever the
override put it and the effect keeps running on the interpolated params.

Blocks and events
-----------------

A block is cut into segments at event frames. Audio before an event is
processed with the state from before it, then the event is applied, then
processing resumes. Event frames past the end of the block land on the
end; frames earlier than the previous event land on the previous event.
*/

use std::f64::consts::TAU;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    config::{EngineConfig, URID_MAP},
    dsp::{
        band::{Band, BandSplit},
        cursor::CursorState,
        fader::{crossfade, Fader},
        flex::Drift,
        grid,
    },
    effect::{StereoFrame, WrappedEffect},
    error::EngineError,
    io::{CursorEvent, CursorPosition, EventReceiver},
    params::{ControllerVector, FlexControls, FxGrid, FxParams, NR_PARAMS},
    state::PersistedState,
};

pub struct Engine<E: WrappedEffect> {
    sample_rate: f64,
    seed: u64,
    rng: ChaCha8Rng,

    controllers: ControllerVector,
    grid: FxGrid,
    speed: FlexControls,
    spin: FlexControls,
    wanted: [Option<Band>; 2],

    bands: BandSplit,
    drift: Drift,
    cursor: CursorState,
    fader: Fader,
    params: FxParams,

    listen: bool,
    ui_attached: bool,

    effect: E,
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}

impl<E: WrappedEffect> Engine<E> {
    pub fn new(config: EngineConfig, effect: E) -> Result<Self, EngineError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(wall_clock_seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let heading = match config.initial_heading {
            Some(heading) => heading,
            None => TAU * rng.gen_range(-1.0f64..1.0),
        };

        info!(
            "engine: {} Hz, {:?} levels, crossover {}/{} Hz order {}",
            config.sample_rate,
            config.level_policy,
            config.low_crossover_hz,
            config.high_crossover_hz,
            config.filter_order
        );
        debug!("engine: seed {}, heading {:.4} rad", seed, heading);

        let controllers = ControllerVector::default();
        let mut engine = Self {
            sample_rate: config.sample_rate,
            seed,
            rng,
            grid: controllers.grid(),
            speed: controllers.speed(),
            spin: controllers.spin(),
            wanted: [None, None],
            controllers,
            bands: BandSplit::new(
                config.sample_rate,
                config.low_crossover_hz,
                config.high_crossover_hz,
                config.filter_order,
            ),
            drift: Drift::new(config.level_policy, config.sample_rate),
            cursor: CursorState::new(0.5, 0.5, heading),
            fader: Fader::new(config.sample_rate),
            params: [0.0; NR_PARAMS],
            listen: false,
            ui_attached: false,
            effect,
        };
        engine.refresh_controls();
        engine.params = grid::interpolate(&engine.grid, engine.cursor.x, engine.cursor.y);
        Ok(engine)
    }

    /// Construct on behalf of a host that advertises its capabilities.
    ///
    /// Fails without building anything if the host cannot map identifiers.
    pub fn instantiate(config: EngineConfig, features: &[&str], effect: E) -> Result<Self, EngineError> {
        if !features.contains(&URID_MAP) {
            warn!("host does not provide {}", URID_MAP);
            return Err(EngineError::MissingFeature(URID_MAP));
        }
        Self::new(config, effect)
    }

    /// Take a fresh controller snapshot. A short slice updates only the
    /// leading controllers.
    pub fn set_controllers(&mut self, raw: &[f32]) {
        self.controllers.update(raw);
        self.refresh_controls();
    }

    pub fn set_controller(&mut self, index: usize, value: f32) {
        self.controllers.set(index, value);
        self.refresh_controls();
    }

    fn refresh_controls(&mut self) {
        self.grid = self.controllers.grid();
        self.speed = self.controllers.speed();
        self.spin = self.controllers.spin();
        self.wanted = [self.speed.source.band(), self.spin.source.band()];
    }

    /// Process one block. Returns the cursor position for the UI when one is
    /// attached and the cursor is moving on its own.
    ///
    /// The block length is the shortest of the four channel slices.
    pub fn process_block<R: EventReceiver>(
        &mut self,
        input: [&[f32]; 2],
        output: [&mut [f32]; 2],
        events: &mut R,
    ) -> Option<CursorPosition> {
        let [in_l, in_r] = input;
        let [out_l, out_r] = output;
        let frames = in_l.len().min(in_r.len()).min(out_l.len()).min(out_r.len());

        let mut start = 0;
        while let Some(timed) = events.pop() {
            let at = (timed.frame as usize).clamp(start, frames);
            self.run(&in_l[start..at], &in_r[start..at], &mut out_l[start..at], &mut out_r[start..at]);
            self.apply(timed.event);
            start = at;
        }
        self.run(
            &in_l[start..frames],
            &in_r[start..frames],
            &mut out_l[start..frames],
            &mut out_r[start..frames],
        );

        self.cursor.rewrap();
        self.telemetry()
    }

    #[inline]
    fn run(&mut self, in_l: &[f32], in_r: &[f32], out_l: &mut [f32], out_r: &mut [f32]) {
        let frames = in_l.iter().zip(in_r).zip(out_l.iter_mut().zip(out_r.iter_mut()));
        for ((&left, &right), (out_left, out_right)) in frames {
            let out = self.process_frame(StereoFrame { left, right });
            *out_left = out.left;
            *out_right = out.right;
        }
    }

    /// One sample of the full pipeline.
    #[inline]
    pub fn process_frame(&mut self, frame: StereoFrame) -> StereoFrame {
        if !self.listen {
            let mono = frame.mono();
            let mono = if mono.is_finite() { mono } else { 0.0 };
            let bands = self.bands.process(mono, self.wanted);
            let motion = self.drift.next_sample(&self.speed, &self.spin, &bands, &mut self.rng);
            self.cursor.step(motion.speed, motion.spin, self.sample_rate);
        }

        self.params = grid::interpolate(&self.grid, self.cursor.x, self.cursor.y);

        let fader = self.fader.next_sample(self.controllers.bypass());
        if fader == 0.0 {
            return frame;
        }

        self.effect.set_parameters(&self.params);
        let processed = self.effect.process(frame);
        let wet = fader * self.controllers.dry_wet();
        StereoFrame {
            left: crossfade(frame.left, processed.left, wet),
            right: crossfade(frame.right, processed.right, wet),
        }
    }

    /// Apply an event immediately, outside of any block.
    pub fn apply(&mut self, event: CursorEvent) {
        match event {
            CursorEvent::Override { x, y } => {
                self.listen = true;
                self.cursor.set_position(x, y);
            }
            CursorEvent::Release => self.listen = false,
            CursorEvent::UiAttached => self.ui_attached = true,
            CursorEvent::UiDetached => self.ui_attached = false,
        }
    }

    fn telemetry(&self) -> Option<CursorPosition> {
        (self.ui_attached && !self.listen).then(|| CursorPosition {
            x: self.cursor.x,
            y: self.cursor.y,
        })
    }

    pub fn save_state(&self) -> PersistedState {
        PersistedState::new(self.cursor.x, self.cursor.y)
    }

    pub fn restore_state(&mut self, state: &PersistedState) {
        let (x, y) = state.sanitized();
        self.cursor
            .set_position(x.unwrap_or(self.cursor.x), y.unwrap_or(self.cursor.y));
        debug!("restored cursor to ({:.3}, {:.3})", self.cursor.x, self.cursor.y);
    }

    /// Clear filter memories, levels, drift and the fader. The cursor keeps
    /// its position and heading.
    pub fn reset(&mut self) {
        self.bands.reset();
        self.drift.reset();
        self.fader.reset();
        self.effect.reset();
        self.listen = false;
        debug!("engine reset");
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    pub fn drift(&self) -> &Drift {
        &self.drift
    }

    pub fn controllers(&self) -> &ControllerVector {
        &self.controllers
    }

    /// Parameters handed to the effect on the last processed sample.
    pub fn params(&self) -> &FxParams {
        &self.params
    }

    pub fn fader(&self) -> f32 {
        self.fader.value()
    }

    pub fn is_listening(&self) -> bool {
        self.listen
    }

    pub fn is_ui_attached(&self) -> bool {
        self.ui_attached
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn effect(&self) -> &E {
        &self.effect
    }

    pub fn effect_mut(&mut self) -> &mut E {
        &mut self.effect
    }
}
