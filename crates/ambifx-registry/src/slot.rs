//! Effect slots: one live effect state fed by a wet buffer.

use ambifx_core::{
    ChannelBuffer, EffectProps, EffectState, EffectType, MAX_EFFECT_CHANNELS, SlotParams,
};
use ambifx_effects::NullState;

use crate::context::Context;
use crate::effect::Effect;
use crate::error::{Error, Result};
use crate::EffectRegistry;

/// Owns one effect state and the parameters it was last given.
///
/// Parameter changes mark the slot dirty; [`update`](Self::update) (or the
/// next [`process`](Self::process)) hands them to the state.
pub struct EffectSlot {
    gain: f32,
    wet_channels: usize,
    effect_type: EffectType,
    props: EffectProps,
    state: Box<dyn EffectState>,
    dirty: bool,
}

impl EffectSlot {
    /// Lowest slot gain.
    pub const MIN_GAIN: f32 = 0.0;
    /// Highest slot gain.
    pub const MAX_GAIN: f32 = 1.0;
    /// Default slot gain.
    pub const DEFAULT_GAIN: f32 = 1.0;

    /// A unity-gain slot holding the null effect.
    pub fn new() -> Self {
        Self {
            gain: Self::DEFAULT_GAIN,
            wet_channels: MAX_EFFECT_CHANNELS,
            effect_type: EffectType::Null,
            props: EffectProps::Null,
            state: Box::new(NullState),
            dirty: true,
        }
    }

    /// Slot gain.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Sets the slot gain (0.0 to 1.0).
    pub fn set_gain(&mut self, ctx: &mut Context, gain: f32) -> Result<()> {
        if !(Self::MIN_GAIN..=Self::MAX_GAIN).contains(&gain) {
            return ctx.check(Err(Error::InvalidGain(gain)));
        }
        self.gain = gain;
        self.dirty = true;
        Ok(())
    }

    /// Number of wet channels fed to the state.
    pub fn wet_channels(&self) -> usize {
        self.wet_channels
    }

    /// Effect type of the live state.
    pub fn effect_type(&self) -> EffectType {
        self.effect_type
    }

    /// Parameters the live state is (or will be) updated with.
    pub fn props(&self) -> &EffectProps {
        &self.props
    }

    /// Whether parameters changed since the last update.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Parameters the state sees for this slot.
    pub fn params(&self) -> SlotParams {
        SlotParams {
            gain: self.gain,
            wet_channels: self.wet_channels,
        }
    }

    /// Copies `effect` into the slot.
    ///
    /// A change of effect type creates a new state and prepares it for the
    /// context's device. If that fails the slot keeps its previous state and
    /// parameters and the error is recorded.
    pub fn apply_effect(&mut self, ctx: &mut Context, registry: &EffectRegistry, effect: &Effect) -> Result<()> {
        let effect_type = effect.effect_type();
        if effect_type != self.effect_type {
            let factory = registry
                .factory(effect_type)
                .ok_or(Error::UnsupportedType(effect_type.raw()));
            let factory = ctx.check(factory)?;

            let mut state = factory.create();
            ctx.check(state.device_update(ctx.device()).map_err(Error::from))?;

            tracing::debug!(from = self.effect_type.id(), to = effect_type.id(), "slot effect changed");
            self.state = state;
            self.effect_type = effect_type;
        }

        self.props = *effect.props();
        self.dirty = true;
        Ok(())
    }

    /// Hands the current parameters to the state.
    pub fn update(&mut self, ctx: &Context) {
        let params = self.params();
        self.state.update(ctx.device(), &params, &self.props, ctx.mix_target());
        self.dirty = false;
    }

    /// Re-prepares the state after the context's device changed, then updates it.
    pub fn device_changed(&mut self, ctx: &mut Context) -> Result<()> {
        ctx.check(self.state.device_update(ctx.device()).map_err(Error::from))?;
        self.update(ctx);
        Ok(())
    }

    /// Runs the state over `wet`, accumulating into `output`.
    ///
    /// Pending parameter changes are applied first.
    pub fn process(&mut self, ctx: &Context, samples_to_do: usize, wet: &[ChannelBuffer], output: &mut [ChannelBuffer]) {
        if self.dirty {
            self.update(ctx);
        }
        let wet = &wet[..wet.len().min(self.wet_channels)];
        self.state.process(samples_to_do, wet, output);
    }
}

impl Default for EffectSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EffectSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectSlot")
            .field("gain", &self.gain)
            .field("wet_channels", &self.wet_channels)
            .field("effect_type", &self.effect_type)
            .field("props", &self.props)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambifx_core::AlError;

    #[test]
    fn gain_range() {
        let mut ctx = Context::default();
        let mut slot = EffectSlot::new();
        slot.set_gain(&mut ctx, 0.0).unwrap();
        slot.set_gain(&mut ctx, 1.0).unwrap();
        assert!(slot.set_gain(&mut ctx, 1.5).is_err());
        assert!(slot.set_gain(&mut ctx, f32::NAN).is_err());
        assert_eq!(slot.gain(), 1.0);
        assert_eq!(ctx.take_error(), Some(AlError::InvalidValue));
    }

    #[test]
    fn apply_changes_type_and_marks_dirty() {
        let registry = EffectRegistry::new();
        let mut ctx = Context::default();
        let mut effect = Effect::new();
        effect.set_type(&mut ctx, &registry, EffectType::Compressor).unwrap();

        let mut slot = EffectSlot::new();
        slot.update(&ctx);
        assert!(!slot.is_dirty());

        slot.apply_effect(&mut ctx, &registry, &effect).unwrap();
        assert_eq!(slot.effect_type(), EffectType::Compressor);
        assert!(slot.is_dirty());
        slot.update(&ctx);
        assert!(!slot.is_dirty());
    }
}
