//! Effect objects: an effect type and its validated parameter block.

use ambifx_core::{EffectProps, EffectStateFactory, EffectType, PropertyTable};
use ambifx_effects::NullStateFactory;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::EffectRegistry;

/// Parameter block an application edits before applying it to a slot.
///
/// Every setter validates through the property table of the current type.
/// Rejected calls leave the props untouched, record their error on the
/// context, and return it.
#[derive(Clone, Copy)]
pub struct Effect {
    effect_type: EffectType,
    props: EffectProps,
    table: &'static dyn PropertyTable,
}

impl Effect {
    /// A null effect.
    pub fn new() -> Self {
        let factory = NullStateFactory;
        Self {
            effect_type: factory.effect_type(),
            props: factory.default_props(),
            table: factory.property_table(),
        }
    }

    /// Current effect type.
    pub fn effect_type(&self) -> EffectType {
        self.effect_type
    }

    /// Current parameter block.
    pub fn props(&self) -> &EffectProps {
        &self.props
    }

    /// Property table of the current type.
    pub fn property_table(&self) -> &'static dyn PropertyTable {
        self.table
    }

    /// Changes the effect type and resets the props to that type's defaults.
    pub fn set_type(&mut self, ctx: &mut Context, registry: &EffectRegistry, effect_type: EffectType) -> Result<()> {
        let factory = registry
            .factory(effect_type)
            .ok_or(Error::UnsupportedType(effect_type.raw()));
        let factory = ctx.check(factory)?;

        self.effect_type = effect_type;
        self.props = factory.default_props();
        self.table = factory.property_table();
        tracing::debug!(effect = effect_type.id(), "effect type set");
        Ok(())
    }

    /// Changes the effect type from its numeric identifier.
    pub fn set_type_raw(&mut self, ctx: &mut Context, registry: &EffectRegistry, value: i32) -> Result<()> {
        let effect_type = ctx.check(EffectType::from_raw(value).ok_or(Error::UnsupportedType(value)))?;
        self.set_type(ctx, registry, effect_type)
    }

    /// Sets an integer property.
    pub fn set_int(&mut self, ctx: &mut Context, param: i32, value: i32) -> Result<()> {
        ctx.check(self.table.set_int(&mut self.props, param, value).map_err(Error::from))
    }

    /// Sets an integer property from a vector.
    pub fn set_int_v(&mut self, ctx: &mut Context, param: i32, values: &[i32]) -> Result<()> {
        ctx.check(self.table.set_int_v(&mut self.props, param, values).map_err(Error::from))
    }

    /// Sets a float property.
    pub fn set_float(&mut self, ctx: &mut Context, param: i32, value: f32) -> Result<()> {
        ctx.check(self.table.set_float(&mut self.props, param, value).map_err(Error::from))
    }

    /// Sets a float property from a vector.
    pub fn set_float_v(&mut self, ctx: &mut Context, param: i32, values: &[f32]) -> Result<()> {
        ctx.check(self.table.set_float_v(&mut self.props, param, values).map_err(Error::from))
    }

    /// Reads an integer property.
    pub fn get_int(&self, ctx: &mut Context, param: i32) -> Result<i32> {
        ctx.check(self.table.get_int(&self.props, param).map_err(Error::from))
    }

    /// Reads an integer property into a vector.
    pub fn get_int_v(&self, ctx: &mut Context, param: i32, values: &mut [i32]) -> Result<()> {
        ctx.check(self.table.get_int_v(&self.props, param, values).map_err(Error::from))
    }

    /// Reads a float property.
    pub fn get_float(&self, ctx: &mut Context, param: i32) -> Result<f32> {
        ctx.check(self.table.get_float(&self.props, param).map_err(Error::from))
    }

    /// Reads a float property into a vector.
    pub fn get_float_v(&self, ctx: &mut Context, param: i32, values: &mut [f32]) -> Result<()> {
        ctx.check(self.table.get_float_v(&self.props, param, values).map_err(Error::from))
    }
}

impl Default for Effect {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Effect")
            .field("effect_type", &self.effect_type)
            .field("props", &self.props)
            .finish_non_exhaustive()
    }
}
