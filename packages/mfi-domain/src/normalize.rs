use crate::{
	hit::ExternalHit,
	result::{NormalizedResult, Provenance, field_text},
};

/// Converts raw hits into [`NormalizedResult`]s, preserving input order.
///
/// Hits without an id or a source document are skipped.
pub fn normalize<I>(hits: I) -> Vec<NormalizedResult>
where
	I: IntoIterator<Item = ExternalHit>,
{
	hits.into_iter().filter_map(normalize_hit).collect()
}

fn normalize_hit(hit: ExternalHit) -> Option<NormalizedResult> {
	let ExternalHit { id, score, source } = hit;
	let (id, source) = (id?, source?);

	Some(NormalizedResult {
		id,
		score: score.unwrap_or(0.0),
		title: field_text(&source, "title"),
		description: field_text(&source, "description"),
		url: field_text(&source, "url"),
		image: field_text(&source, "image"),
		price: field_text(&source, "price"),
		sku: field_text(&source, "sku"),
		provenance: Provenance::External,
		raw: source,
	})
}
