//! Null effect: accepts every lifecycle call and outputs nothing.

use alloc::boxed::Box;

use ambifx_core::{
    ChannelBuffer, Device, EffectError, EffectProps, EffectState, EffectStateFactory, EffectType,
    MixTarget, PropertyDescriptor, PropertyError, PropertyTable, SlotParams,
};

/// State of an empty effect slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullState;

impl EffectState for NullState {
    fn device_update(&mut self, _device: &Device) -> Result<(), EffectError> {
        Ok(())
    }

    fn update(&mut self, _device: &Device, _slot: &SlotParams, _props: &EffectProps, _target: &MixTarget) {}

    fn process(&mut self, _samples_to_do: usize, _input: &[ChannelBuffer], _output: &mut [ChannelBuffer]) {}
}

/// Property table with no properties; every access is [`PropertyError::InvalidEnum`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProperties;

impl PropertyTable for NullProperties {
    fn descriptors(&self) -> &'static [PropertyDescriptor] {
        &[]
    }

    fn set_int(&self, _props: &mut EffectProps, param: i32, _value: i32) -> Result<(), PropertyError> {
        Err(PropertyError::InvalidEnum { param })
    }

    fn set_int_v(&self, _props: &mut EffectProps, param: i32, _values: &[i32]) -> Result<(), PropertyError> {
        Err(PropertyError::InvalidEnum { param })
    }

    fn set_float(&self, _props: &mut EffectProps, param: i32, _value: f32) -> Result<(), PropertyError> {
        Err(PropertyError::InvalidEnum { param })
    }

    fn set_float_v(&self, _props: &mut EffectProps, param: i32, _values: &[f32]) -> Result<(), PropertyError> {
        Err(PropertyError::InvalidEnum { param })
    }

    fn get_int(&self, _props: &EffectProps, param: i32) -> Result<i32, PropertyError> {
        Err(PropertyError::InvalidEnum { param })
    }

    fn get_int_v(&self, _props: &EffectProps, param: i32, _values: &mut [i32]) -> Result<(), PropertyError> {
        Err(PropertyError::InvalidEnum { param })
    }

    fn get_float(&self, _props: &EffectProps, param: i32) -> Result<f32, PropertyError> {
        Err(PropertyError::InvalidEnum { param })
    }

    fn get_float_v(&self, _props: &EffectProps, param: i32, _values: &mut [f32]) -> Result<(), PropertyError> {
        Err(PropertyError::InvalidEnum { param })
    }
}

static NULL_PROPERTIES: NullProperties = NullProperties;

/// Factory for [`NullState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStateFactory;

impl EffectStateFactory for NullStateFactory {
    fn effect_type(&self) -> EffectType {
        EffectType::Null
    }

    fn create(&self) -> Box<dyn EffectState> {
        Box::new(NullState)
    }

    fn default_props(&self) -> EffectProps {
        EffectProps::Null
    }

    fn property_table(&self) -> &'static dyn PropertyTable {
        &NULL_PROPERTIES
    }
}
