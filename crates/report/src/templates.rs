//! Built-in [upon] templates.
//!
//! Every template receives plain values prepared by
//! [`Reporter`](crate::Reporter): strings, integers, booleans and lists of
//! those. Conditions are always explicit booleans (`found`, `has_causes`,
//! `has_more`, ...) so that no template relies on truthiness of other types.
//! Lists of strings go through the `join` formatter.

/// The mandatory 5-step structure, pre-filled for every code in an analysis.
/// Steps 3 to 5 carry search queries for the video, parts and garage lookups
/// that happen outside this crate.
pub const DIAGNOSTIC_PROMPT: &str = r#"🔧 **AUTOMOTIVE DIAGNOSTIC REPORT**
{% if empty %}
No OBD-II trouble codes were found. Ask for the codes shown by the scanner, or describe the symptoms.
{% else %}{% for code in codes %}
━━━ {{ code.code }} ({{ code.category }}) ━━━

**STEP 1 - WHAT IT MEANS:**
{% if code.found %}{{ code.description }}{% else %}{{ code.code }} is not in the diagnostic database (may be manufacturer-specific). Explain it from general OBD-II knowledge and say that it is not a database entry.{% endif %}

**STEP 2 - WHAT MIGHT CAUSE IT:**
{% if code.has_causes %}{% for cause in code.causes %}• {{ cause }}
{% endfor %}{% else %}• I don't have recorded causes for this code
{% endif %}
**STEP 3 - HOW TO FIX IT AT HOME:**
Search repair videos for "{{ code.video_query }}". If none are found, say "❌ I could not find relevant repair videos for this issue".

**STEP 4 - DIFFICULTY LEVEL:**
Rate as BEGINNER / INTERMEDIATE / PROFESSIONAL and explain the tools and skills required.

**STEP 5 - COST & TIME ESTIMATE:**
• DIY Time: [estimate]
• Parts Cost: [range]
• Professional Cost: [range]
Search replacement parts for "{{ code.parts_query }}". If costs are unknown, say "I don't have specific cost information for this repair".
{% endfor %}{% if multiple %}
🏪 **LOCAL REPAIR SHOPS**
Search nearby garages once for all {{ total }} codes above.
{% endif %}{% endif %}"#;

/// One-line answer for a single lookup.
pub const CODE_SUMMARY: &str = "{% if found %}OBD Code {{ code }}: {{ description }}.{% if has_causes %} Possible causes: {{ causes|join }}{% endif %}{% else %}OBD Code {{ code }} not found in database.{% endif %}";

/// Every code extracted from a chat message.
pub const ANALYSIS_SUMMARY: &str = r#"{% if empty %}No OBD diagnostic trouble codes found in the provided text.{% else %}Found {{ total }} OBD codes in the text:
{% for code in codes %}
• {{ code.code }}: {% if code.found %}{{ code.description }}{% if code.has_causes %}
  Possible causes: {{ code.causes|join }}{% endif %}{% else %}Code not found in database{% endif %}
{% endfor %}{% endif %}"#;

/// Result of scanning an uploaded file.
pub const FILE_ANALYSIS: &str = r#"{% if blank %}The uploaded file appears to be empty or unreadable.{% else %}📁 **File Analysis Results for {{ file_name }}:**
{% if empty %}{% if has_keywords %}
❌ **No OBD codes found** in the uploaded file, but detected automotive-related content.

**Keywords found:** {{ keywords|join }}
{% else %}
❌ **No OBD codes or automotive content detected** in this file.
{% endif %}
**File content preview:**
```
{{ preview }}{% if truncated %}...{% endif %}
```
{% if has_keywords %}
**Suggestions:**
• If this is a diagnostic report, the codes might be in a different format
• Try uploading a text file or CSV export from your scanner
• You can also tell me the codes directly (e.g., "I have codes P0301 and P0420")
{% else %}
**This appears to be a non-automotive file. Please upload:**
• OBD scanner reports
• Diagnostic trouble code lists
• Car diagnostic text files
• Or simply tell me your trouble codes directly
{% endif %}{% else %}
✅ **Found {{ total }} OBD diagnostic codes:** {{ code_list|join }}

**Detailed Analysis:**
{% for code in codes %}
{% if code.found %}**{{ code.code }}:** {{ code.description }}{% if code.has_causes %}
• **Possible causes:** {{ code.causes|join }}{% endif %}{% else %}**{{ code.code }}:** Code not found in database (may be manufacturer-specific){% endif %}
{% endfor %}
**File content preview:**
```
{{ preview }}{% if truncated %}...{% endif %}
```

**Next Steps:**
I'll now provide a complete diagnostic analysis following my 5-step process for each code found.
{% endif %}{% endif %}"#;

/// Keyword (symptom) search results.
pub const SEARCH_SUMMARY: &str = r#"{% if empty %}No OBD codes found matching keyword '{{ keyword }}'.{% else %}Found {{ total }} OBD codes matching '{{ keyword }}':
{% for record in records %}
• {{ record.code }}: {{ record.description }}{% endfor %}{% if has_more %}
... and {{ more }} more codes{% endif %}
{% endif %}"#;

/// Browsable preview of the whole database.
pub const LISTING: &str = r#"Database contains {{ total }} OBD codes:
{% for record in records %}
• {{ record.code }}: {{ record.description }}{% endfor %}{% if has_more %}
... and {{ more }} more codes{% endif %}
"#;

/// Per-category counts.
pub const CATEGORY_OVERVIEW: &str = r#"OBD Code Categories:
{% for category in categories %}
• {{ category.letter }} ({{ category.name }}): {{ category.count }} codes
  {{ category.description }}{% endfor %}
"#;
