pub(crate) fn build_url(base: &str, segments: &[&str]) -> String {
    let mut url = base.trim_end_matches('/').to_string();
    for segment in segments {
        url.push('/');
        url.push_str(segment.trim_matches('/'));
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_segments_without_doubled_slashes() {
        let url = build_url("https://example.com/compute/v1/", &["projects", "p1"]);
        assert_eq!(url, "https://example.com/compute/v1/projects/p1");
    }
}
