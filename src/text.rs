/// Entities the trivia endpoint is known to emit in question and answer
/// text, paired with their literal characters.
const ENTITIES: [(&str, char); 9] = [
    ("&quot;", '"'),
    ("&#039;", '\''),
    ("&amp;", '&'),
    ("&rsquo;", '’'),
    ("&oacute;", 'ó'),
    ("&uacute;", 'ú'),
    ("&eacute;", 'é'),
    ("&lt;", '<'),
    ("&gt;", '>'),
];

/// Decodes the fixed entity set above; everything else passes through
/// untouched. Single left-to-right pass, decoded output is never
/// rescanned, so `&amp;lt;` comes out as the literal text `&lt;`.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    'outer: while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        for (entity, ch) in ENTITIES {
            if rest.starts_with(entity) {
                out.push(ch);
                rest = &rest[entity.len()..];
                continue 'outer;
            }
        }
        out.push('&');
        rest = &rest[1..];
    }
    out.push_str(rest);
    out
}
