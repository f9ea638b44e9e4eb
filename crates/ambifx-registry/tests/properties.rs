//! Property-based tests for the context error latch and slot gain validation.

use ambifx_core::{AlError, EffectError, PropertyError};
use ambifx_registry::{Context, EffectSlot, Error};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum LatchOp {
    Record(Error),
    Take,
    Peek,
}

fn host_error() -> impl Strategy<Value = Error> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(Error::UnknownEffect),
        any::<i32>().prop_map(Error::UnsupportedType),
        any::<i32>().prop_map(|param| Error::Property(PropertyError::InvalidEnum { param })),
        any::<i32>().prop_map(|param| Error::Property(PropertyError::InvalidValue {
            param,
            reason: "out of range",
        })),
        Just(Error::Effect(EffectError::OutOfMemory { what: "state" })),
        any::<f32>().prop_map(Error::InvalidGain),
    ]
}

fn latch_op() -> impl Strategy<Value = LatchOp> {
    prop_oneof![
        3 => host_error().prop_map(LatchOp::Record),
        1 => Just(LatchOp::Take),
        1 => Just(LatchOp::Peek),
    ]
}

fn gain_value() -> impl Strategy<Value = f32> {
    prop_oneof![
        -2.0f32..=2.0,
        0.0f32..=1.0,
        Just(f32::NAN),
        Just(f32::INFINITY),
        Just(f32::NEG_INFINITY),
        Just(-0.0f32),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// The latch keeps the class of the first error recorded since the last
    /// take; later errors never replace it.
    #[test]
    fn first_error_wins_between_takes(ops in prop::collection::vec(latch_op(), 0..40)) {
        let mut ctx = Context::default();
        let mut pending: Option<AlError> = None;

        for op in ops {
            match op {
                LatchOp::Record(err) => {
                    let class = err.al_error();
                    ctx.record(&err);
                    if pending.is_none() {
                        pending = Some(class);
                    }
                }
                LatchOp::Take => {
                    prop_assert_eq!(ctx.take_error(), pending.take());
                }
                LatchOp::Peek => {
                    prop_assert_eq!(ctx.peek_error(), pending);
                }
            }
        }
        prop_assert_eq!(ctx.take_error(), pending);
        prop_assert_eq!(ctx.take_error(), None);
    }

    /// Gains inside [0, 1] are stored as given; anything else is rejected,
    /// leaves the previous gain in place and latches InvalidValue.
    #[test]
    fn slot_gain_accepts_only_unit_range(gains in prop::collection::vec(gain_value(), 1..20)) {
        let mut ctx = Context::default();
        let mut slot = EffectSlot::new();
        let mut expected = EffectSlot::DEFAULT_GAIN;

        for gain in gains {
            let result = slot.set_gain(&mut ctx, gain);
            if (0.0..=1.0).contains(&gain) {
                prop_assert!(result.is_ok());
                prop_assert_eq!(ctx.take_error(), None);
                expected = gain;
            } else {
                prop_assert!(matches!(result, Err(Error::InvalidGain(_))));
                prop_assert_eq!(ctx.take_error(), Some(AlError::InvalidValue));
            }
            prop_assert_eq!(slot.gain().to_bits(), expected.to_bits());
        }
    }
}
