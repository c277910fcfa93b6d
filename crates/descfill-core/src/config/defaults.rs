pub(super) fn default_log_level() -> String {
    "info".to_string()
}

pub(super) fn default_base_url() -> String {
    "https://paratranz.cn/api".to_string()
}

pub(super) fn default_page_size() -> u32 {
    100
}

pub(super) fn default_key_pattern() -> String {
    "^item_desc".to_string()
}

pub(super) fn default_text_dir() -> String {
    "data".to_string()
}

pub(super) fn default_keys_file() -> String {
    "keys.txt".to_string()
}

pub(super) fn default_effects_file() -> String {
    "effects.txt".to_string()
}

pub(super) fn default_manufacturers_file() -> String {
    "manufacturers.txt".to_string()
}

pub(super) fn default_general_values_file() -> String {
    "general_values.txt".to_string()
}

pub(super) fn default_templates_file() -> String {
    "num_templates.txt".to_string()
}

pub(super) fn default_en_file() -> String {
    "en.ini".to_string()
}

pub(super) fn default_cn_file() -> String {
    "cn.ini".to_string()
}

pub(super) fn default_ref_file() -> String {
    "ref.ini".to_string()
}

pub(super) fn default_en_url() -> String {
    "https://ini.42kit.com/orginal/global.ini".to_string()
}

pub(super) fn default_cn_url() -> String {
    "https://ini.42kit.com/full/global.ini".to_string()
}

pub(super) fn default_ref_url() -> String {
    "https://ini.42kit.com/both/global.ini".to_string()
}

pub(super) fn default_ntfy_url() -> String {
    "https://ntfy.sh/".to_string()
}

pub(super) fn default_ntfy_topic() -> String {
    "general".to_string()
}
