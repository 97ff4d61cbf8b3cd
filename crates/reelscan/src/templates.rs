//! Text output templates.
//!
//! Templates are stored as `(name, content)` pairs and registered on the
//! renderer's MiniJinja environment with block trimming enabled.
//!
//! Available filters: `style(name)` and `col(width, align=?)`.

/// All templates, by name.
pub const TEMPLATES: &[(&str, &str)] = &[
    ("discover/cards", CARDS_TEMPLATE),
    ("discover/table", TABLE_TEMPLATE),
    ("insights", INSIGHTS_TEMPLATE),
];

/// Shared KPI header and notices for discovery views.
///
/// Variables: `kpis`, `query`, `search_field`, `matched`, `sort`, `notice`.
const HEADER: &str = r#"{{ "Find Your Next Story" | style("header") }}
{{ "Total Matches" | style("label") }} {{ kpis.total | style("kpi") }}   {{ "Movies" | style("label") }} {{ kpis.movies | style("kpi") }}   {{ "TV Shows" | style("label") }} {{ kpis.tv_shows | style("kpi") }}
{% if query %}
{{ "Search" | style("label") }} "{{ query }}" in {{ search_field }}: {{ matched }} {{ "match" if matched == 1 else "matches" }}
{% endif %}
{% if sort.status == "sorted" %}
{{ "Sorted by" | style("label") }} {{ sort.field }} ({{ sort.dir }})
{% endif %}
{% if notice %}
{{ notice | style("notice") }}
{% endif %}
"#;

/// Card grid. Each entry of `rows` is a list of printed lines, and each line
/// holds one `{text, style}` cell per card, side by side in `card_width`
/// columns.
const CARDS_TEMPLATE: &str = r#"{% include "discover/header" %}
{% if rows | length == 0 %}

{{ "No titles match." | style("muted") }}
{% endif %}
{% for row in rows %}

{{ rule | style("muted") }}
{% for line in row %}
{% for cell in line %}{% if loop.last %}{{ cell.text | style(cell.style) }}{% else %}{{ cell.text | col(card_width) | style(cell.style) }}  {% endif %}{% endfor %}{{ "" }}
{% endfor %}
{% endfor %}
"#;

/// One line per record.
const TABLE_TEMPLATE: &str = r#"{% include "discover/header" %}

{{ "Title" | col(40) | style("label") }} {{ "Type" | col(8) | style("label") }} {{ "Year" | col(4, align="right") | style("label") }} {{ "Rating" | col(8) | style("label") }} {{ "Duration" | col(10) | style("label") }}
{% for r in records %}
{{ r.title | col(40) | style("title") }} {{ r["type"] | col(8) }} {{ r.release_year | col(4, align="right") }} {{ r.rating | col(8) }} {{ r.duration | col(10) }}
{% else %}
{{ "No titles match." | style("muted") }}
{% endfor %}
"#;

/// Aggregate tables.
///
/// Variables: `total`, `type_distribution`, `top_countries`, `pivot`.
const INSIGHTS_TEMPLATE: &str = r#"{{ "Catalog Insights" | style("header") }} ({{ total }} titles)

{{ "Content Type Distribution" | style("label") }}
{% for c in type_distribution %}
  {{ c.label | col(24) }} {{ c.count | col(6, align="right") }} {{ c.share | col(6, align="right") }}%
{% else %}
  {{ "none" | style("muted") }}
{% endfor %}

{{ "Top Countries" | style("label") }}
{% for c in top_countries %}
  {{ c.label | col(24) }} {{ c.count | col(6, align="right") }}
{% else %}
  {{ "none" | style("muted") }}
{% endfor %}

{{ "Rating vs Type" | style("label") }}
{% if pivot.rows | length == 0 %}
  {{ "none" | style("muted") }}
{% else %}
  {{ "rating" | col(10) }}{% for t in pivot.types %} {{ t | col(10, align="right") }}{% endfor %}

{% for row in pivot.rows %}
  {{ row.rating | col(10) }}{% for n in row.counts %} {{ n | col(10, align="right") }}{% endfor %}

{% endfor %}
{% endif %}
"#;

/// Header partial, registered alongside [`TEMPLATES`].
pub const PARTIALS: &[(&str, &str)] = &[("discover/header", HEADER)];
