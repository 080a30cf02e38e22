//! Patches for the generated project `urls.py`

use super::SourceFile;
use crate::error::Result;
use regex::Regex;

const PATH_INCLUDE_IMPORT: &str = "from django.urls import path, include";
const PATH_IMPORT: &str = "from django.urls import path";
const URLPATTERNS_HEADER: &str = "urlpatterns = [";
const STATIC_GUARD: &str = "static(settings.STATIC_URL";

const STATIC_BLOCK: &str = "\nfrom django.conf import settings\nfrom django.conf.urls.static import static\n\nurlpatterns += static(settings.STATIC_URL, document_root=settings.STATIC_ROOT)\n";

/// Make sure `include` is importable from `django.urls`.
///
/// Upgrades the generated `from django.urls import path` line when
/// present, extends any other `from django.urls import ...` line
/// otherwise, and prepends the full import as a last resort.
///
/// # Errors
/// Returns an error only if the import pattern fails to compile.
pub fn ensure_include_import(urls: &mut SourceFile) -> Result<()> {
    if urls.contains(PATH_INCLUDE_IMPORT) {
        return Ok(());
    }

    if urls.contains(PATH_IMPORT) {
        urls.replace_first(PATH_IMPORT, PATH_INCLUDE_IMPORT);
    } else if urls.contains("from django.urls import") {
        let import_line = Regex::new(r"from django\.urls import (.+)")?;
        urls.rewrite(&import_line, "from django.urls import $1, include");
    } else {
        urls.ensure_import(PATH_INCLUDE_IMPORT);
    }

    Ok(())
}

/// Include an app's routes at the root of `urlpatterns`.
///
/// The include line becomes the list's first element and is guarded by
/// its own text, so re-running never duplicates it. Independent from app
/// registration in the settings file; the two may run in either order.
///
/// # Errors
/// Returns an error only if the import pattern fails to compile.
pub fn include_app_routes(urls: &mut SourceFile, app: &str) -> Result<()> {
    ensure_include_import(urls)?;

    let include_expr = format!("path('', include('{app}.urls'))");
    urls.ensure_list_entry(URLPATTERNS_HEADER, &format!("{include_expr},"), &include_expr);

    Ok(())
}

/// Append the static-file serving wiring once.
///
/// Keyed on the distinguishing `static(settings.STATIC_URL` substring; a
/// routing file that already serves static files is left unchanged.
pub fn enable_static_serving(urls: &mut SourceFile) {
    urls.ensure_append_once(STATIC_GUARD, STATIC_BLOCK);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(content: &str) -> SourceFile {
        SourceFile::from_content("urls.py", content)
    }

    #[test]
    fn test_import_upgrade_from_plain_path() {
        let mut f = file("from django.urls import path\n\nurlpatterns = [\n]\n");
        ensure_include_import(&mut f).unwrap();
        assert!(f.content().starts_with("from django.urls import path, include\n"));
        assert_eq!(f.content().matches("import path").count(), 1);
    }

    #[test]
    fn test_import_extends_other_import_list() {
        let mut f = file("from django.urls import re_path\n\nurlpatterns = [\n]\n");
        ensure_include_import(&mut f).unwrap();
        assert!(f
            .content()
            .starts_with("from django.urls import re_path, include\n"));
    }

    #[test]
    fn test_import_prepended_when_missing() {
        let mut f = file("urlpatterns = [\n]\n");
        ensure_include_import(&mut f).unwrap();
        assert!(f
            .content()
            .starts_with("from django.urls import path, include\n"));
    }

    #[test]
    fn test_import_noop_when_already_full() {
        let source = "from django.urls import path, include\n\nurlpatterns = [\n]\n";
        let mut f = file(source);
        ensure_include_import(&mut f).unwrap();
        assert_eq!(f.content(), source);
    }

    #[test]
    fn test_include_app_routes_inserts_first() {
        let mut f = file(
            "from django.urls import path\nfrom django.contrib import admin\n\nurlpatterns = [\n    path('admin/', admin.site.urls),\n]\n",
        );
        include_app_routes(&mut f, "blog").unwrap();

        assert!(f.content().contains(
            "urlpatterns = [\n    path('', include('blog.urls')),\n    path('admin/', admin.site.urls),\n]"
        ));

        // Re-running changes nothing
        let once = f.content().to_string();
        include_app_routes(&mut f, "blog").unwrap();
        assert_eq!(f.content(), once);
    }

    #[test]
    fn test_include_app_routes_for_two_apps() {
        let mut f = file("from django.urls import path\n\nurlpatterns = [\n]\n");
        include_app_routes(&mut f, "blog").unwrap();
        include_app_routes(&mut f, "shop").unwrap();

        assert_eq!(f.content().matches("include('blog.urls')").count(), 1);
        assert_eq!(f.content().matches("include('shop.urls')").count(), 1);
        // Latest app ends up first
        assert!(f.content().contains(
            "urlpatterns = [\n    path('', include('shop.urls')),\n    path('', include('blog.urls')),"
        ));
    }

    #[test]
    fn test_static_serving_appended_once() {
        let mut f = file("from django.urls import path\n\nurlpatterns = [\n]\n");
        enable_static_serving(&mut f);
        let once = f.content().to_string();

        assert!(once.contains("from django.conf import settings"));
        assert!(once.contains(
            "urlpatterns += static(settings.STATIC_URL, document_root=settings.STATIC_ROOT)"
        ));

        enable_static_serving(&mut f);
        assert_eq!(f.content(), once);
    }

    #[test]
    fn test_static_serving_respects_existing_block() {
        let source = "from django.conf import settings\nfrom django.conf.urls.static import static\n\nurlpatterns = []\nurlpatterns += static(settings.STATIC_URL, document_root=settings.STATIC_ROOT)\n";
        let mut f = file(source);
        enable_static_serving(&mut f);
        assert_eq!(f.content(), source);
    }
}
