use std::collections::HashSet;

use mfi_domain::{NativeProduct, NativeResultSet, NormalizedResult, ProductId};

/// Appends Marqo results to the widget's products.
///
/// Native products keep their order and always win: an external result whose id matches
/// a product already in the set (see [`ProductId`] for the equality rule) is dropped, and
/// so is a repeated external id. An empty `external` slice leaves `native` untouched.
pub fn merge_results(mut native: NativeResultSet, external: &[NormalizedResult]) -> NativeResultSet {
	if external.is_empty() {
		return native;
	}

	let mut seen: HashSet<ProductId> =
		native.products().iter().filter_map(NativeProduct::id).collect();

	for result in external {
		if !seen.insert(ProductId::Text(result.id.clone())) {
			continue;
		}

		native.push_external(NativeProduct::from(result));
	}

	native.mark_enhanced();

	native
}
