use super::render::escape_html;

pub const PAGE_TITLE: &str = "Virtual Try-On Diffusion";
pub const GATEWAY_LISTING_URL: &str = "https://rapidapi.com";
pub const PROMPT_SYNTAX_URL: &str = "https://github.com/damian0815/compel/blob/main/doc/syntax.md";

pub const CLOTHING_PROMPT_EXAMPLES: [&str; 8] = [
    "a sheer blue sleeveless mini dress",
    "a beige woolen sweater and white pleated skirt",
    "a black leather jacket and dark blue slim-fit jeans",
    "a floral pattern blouse and leggings",
    "a paisley pattern purple shirt and beige chinos",
    "a striped white and blue polo shirt and blue jeans",
    "a colorful t-shirt and black shorts",
    "a checked pattern shirt and dark blue cargo pants",
];

pub const AVATAR_PROMPT_EXAMPLES: [&str; 8] = [
    "a beautiful blond girl with long hair",
    "a cute redhead girl with freckles",
    "a plus size female model wearing sunglasses",
    "a woman with dark hair and blue eyes",
    "a fit man with dark beard and blue eyes",
    "a young blond man posing for a photo",
    "a gentleman with beard and mustache",
    "a plus size man walking",
];

pub const BACKGROUND_PROMPT_EXAMPLES: [&str; 8] = [
    "in an autumn park",
    "in front of a brick wall",
    "near an old tree",
    "on a busy city street",
    "in front of a staircase",
    "on an ocean beach with palm trees",
    "in a shopping mall",
    "in a modern office",
];

struct Section {
    key: &'static str,
    title: &'static str,
    blurb: &'static str,
    examples: &'static [&'static str],
}

const SECTIONS: [Section; 3] = [
    Section {
        key: "clothing",
        title: "Clothing",
        blurb: "Clothing may be specified with a reference image or a text prompt. \
                Image and prompt can also be used together. \
                If both are empty the model will generate random clothing.",
        examples: &CLOTHING_PROMPT_EXAMPLES,
    },
    Section {
        key: "avatar",
        title: "Avatar",
        blurb: "Avatar may be specified with a subject photo or a text prompt. \
                A prompt can replace the person while preserving clothing. \
                If both are empty the model will generate a random avatar.",
        examples: &AVATAR_PROMPT_EXAMPLES,
    },
    Section {
        key: "background",
        title: "Background",
        blurb: "Replacing the background is optional. \
                It may be specified with a reference image or a text prompt. \
                If omitted the original avatar background is preserved.",
        examples: &BACKGROUND_PROMPT_EXAMPLES,
    },
];

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0 auto; max-width: 1400px; padding: 16px; background: #f5f6fa; }
header { background: #001537; color: #ffb347; border-radius: 10px; padding: 8px 16px; }
header h1 { margin: 0; letter-spacing: 2px; text-transform: uppercase; }
.grid { display: grid; grid-template-columns: repeat(4, 1fr); gap: 16px; margin-top: 16px; }
.column { background: #fff; border-radius: 10px; padding: 12px; }
textarea { width: 100%; min-height: 80px; box-sizing: border-box; }
.examples button { margin: 2px; font-size: 0.8em; }
img.preview, img#result-image { max-width: 100%; margin-top: 8px; }
button.primary { width: 100%; padding: 10px; background: #4f46e5; color: #fff; border: 0; border-radius: 6px; font-size: 1.1em; }
button.primary:disabled { background: #9ca3af; }
"#;

const SCRIPT: &str = r#"
function readFile(input) {
  return new Promise((resolve, reject) => {
    const file = input.files[0];
    if (!file) { resolve(null); return; }
    const reader = new FileReader();
    reader.onload = () => resolve(reader.result);
    reader.onerror = () => reject(reader.error);
    reader.readAsDataURL(file);
  });
}
function textOrNull(id) {
  const value = document.getElementById(id).value;
  return value.trim() === "" ? null : value;
}
document.querySelectorAll(".examples button").forEach((button) => {
  button.addEventListener("click", () => {
    document.getElementById(button.dataset.target).value = button.textContent;
  });
});
document.querySelectorAll("input[type=file]").forEach((input) => {
  input.addEventListener("change", async () => {
    const preview = document.getElementById(input.id + "-preview");
    const url = await readFile(input);
    preview.src = url || "";
    preview.hidden = !url;
  });
});
document.getElementById("generate").addEventListener("click", async () => {
  const button = document.getElementById("generate");
  const details = document.getElementById("result-details");
  const result = document.getElementById("result-image");
  button.disabled = true;
  details.innerHTML = "<p>Generating...</p>";
  try {
    const body = {
      clothing_image: await readFile(document.getElementById("clothing_image")),
      clothing_prompt: textOrNull("clothing_prompt"),
      avatar_image: await readFile(document.getElementById("avatar_image")),
      avatar_prompt: textOrNull("avatar_prompt"),
      avatar_sex: document.getElementById("avatar_sex").value || null,
      background_image: await readFile(document.getElementById("background_image")),
      background_prompt: textOrNull("background_prompt"),
      seed: parseInt(document.getElementById("seed").value, 10),
    };
    if (Number.isNaN(body.seed)) { body.seed = -1; }
    const response = await fetch("/api/try-on", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify(body),
    });
    const view = await response.json();
    result.src = view.image || "";
    result.hidden = !view.image;
    details.innerHTML = view.details;
  } catch (err) {
    result.hidden = true;
    details.innerHTML = "<h3>Error</h3><p>" + err + "</p>";
  } finally {
    button.disabled = false;
  }
});
"#;

fn render_section(section: &Section) -> String {
    let key = section.key;
    let examples: String = section
        .examples
        .iter()
        .map(|example| {
            format!(
                r#"<button type="button" data-target="{key}_prompt">{}</button>"#,
                escape_html(example)
            )
        })
        .collect();

    let mut html = format!(
        r#"<div class="column">
<h2>{title}</h2>
<p>{blurb}</p>
<label for="{key}_image">{title} Image</label>
<input type="file" id="{key}_image" accept="image/*"/>
<img class="preview" id="{key}_image-preview" hidden/>
<label for="{key}_prompt">{title} Prompt</label>
<textarea id="{key}_prompt"></textarea>
<small>Compel weighting <a href="{syntax}">syntax</a> is supported.</small>
<div class="examples">{examples}</div>
"#,
        title = section.title,
        blurb = section.blurb,
        syntax = PROMPT_SYNTAX_URL,
    );

    if key == "avatar" {
        html.push_str(
            r#"<label for="avatar_sex">Avatar Sex</label>
<select id="avatar_sex">
<option value="" selected>Auto</option>
<option value="male">Male</option>
<option value="female">Female</option>
</select>
"#,
        );
    }

    html.push_str("</div>\n");
    html
}

/// Full HTML of the demo page.
pub fn render_page(show_gateway_link: bool) -> String {
    let sections: String = SECTIONS.iter().map(render_section).collect();

    let gateway_link = if show_gateway_link {
        format!(
            r#"<p>The API is also available on <a href="{}">RapidAPI</a>.</p>"#,
            GATEWAY_LISTING_URL
        )
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8"/>
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<header><h1>{title}</h1></header>
<p>Experiment with multi-modal virtual try-on using images and text prompts.
Mix and match clothing, avatars and backgrounds.</p>
{gateway_link}
<div class="grid">
{sections}<div class="column">
<h2>Generation</h2>
<label for="seed">Seed</label>
<input type="number" id="seed" value="-1" min="-1"/>
<small>Specify -1 for a random seed for each generation.</small>
<button type="button" class="primary" id="generate">Generate</button>
<img id="result-image" alt="Result" hidden/>
<div id="result-details"></div>
</div>
</div>
<script>{script}</script>
</body>
</html>
"#,
        title = PAGE_TITLE,
        style = STYLE,
        script = SCRIPT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_has_all_widgets() {
        let page = render_page(false);
        for id in [
            "clothing_image",
            "clothing_prompt",
            "avatar_image",
            "avatar_prompt",
            "avatar_sex",
            "background_image",
            "background_prompt",
            "seed",
            "generate",
            "result-image",
            "result-details",
        ] {
            assert!(page.contains(&format!(r#"id="{id}""#)), "missing {id}");
        }
        assert!(!page.contains(GATEWAY_LISTING_URL));
    }

    #[test]
    fn page_lists_example_prompts() {
        let page = render_page(true);
        assert!(page.contains(GATEWAY_LISTING_URL));
        for example in CLOTHING_PROMPT_EXAMPLES
            .iter()
            .chain(&AVATAR_PROMPT_EXAMPLES)
            .chain(&BACKGROUND_PROMPT_EXAMPLES)
        {
            assert!(page.contains(example), "missing example {example:?}");
        }
    }

    #[test]
    fn avatar_sex_choices() {
        let page = render_page(false);
        assert!(page.contains(r#"<option value="" selected>Auto</option>"#));
        assert!(page.contains(r#"<option value="male">Male</option>"#));
        assert!(page.contains(r#"<option value="female">Female</option>"#));
    }
}
