use arbitrary::{Arbitrary, Unstructured};

use crate::detail::{Kind, MAX_ORDINAL, TypeDetail};

impl<'a> Arbitrary<'a> for Kind {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        u.choose(&Kind::ALL).copied()
    }
}

impl<'a> Arbitrary<'a> for TypeDetail {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        // Reserved bits stay clear so generated headers match what encoders emit.
        let kind = Kind::arbitrary(u)?;
        let ordinal = u.int_in_range(0..=MAX_ORDINAL)?;
        Ok(TypeDetail::new().with_kind(kind).with_ordinal(ordinal))
    }
}
