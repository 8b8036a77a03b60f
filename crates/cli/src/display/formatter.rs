use std::time::SystemTime;
use workbench_core::{Dependency, DependencyLocation, DependencySet, ProjectRecord, SkippedProject};

pub fn print_project(record: &ProjectRecord) {
    let descriptor = &record.descriptor;
    println!(
        "📦 {} {}",
        descriptor.name(),
        descriptor.version().unwrap_or("(no version)")
    );
    println!("   📁 Path: {}", record.path.display());

    match (&record.manifest, descriptor.manifest_path()) {
        (Some(manifest), Some(path)) => println!(
            "   🧩 Manifest: {} ({} commands)",
            path.display(),
            manifest
                .get("commands")
                .and_then(|c| c.as_array())
                .map_or(0, |c| c.len())
        ),
        (None, Some(path)) => println!("   🧩 Manifest: {} (unreadable)", path.display()),
        _ => println!("   🧩 Manifest: not declared"),
    }

    println!(
        "   🖼  Icon: {}",
        if record.icon.is_some() { "yes" } else { "missing" }
    );
    if let Some(created) = record.created_at {
        println!("   🕒 Created: {}", format_age(created));
    }
    println!(
        "   🔗 Declared: {} dependencies, {} dev dependencies",
        descriptor.declared(DependencyLocation::Dependencies).count(),
        descriptor.declared(DependencyLocation::DevDependencies).count()
    );
}

pub fn print_skipped(skipped: &[SkippedProject]) {
    if skipped.is_empty() {
        return;
    }
    println!("\n⚠️  Skipped {} director(ies):", skipped.len());
    for entry in skipped {
        println!("   • {}: {}", entry.path.display(), entry.reason);
    }
}

pub fn print_dependency(dependency: &Dependency) {
    let marker = match dependency.location {
        DependencyLocation::Dependencies => "•",
        DependencyLocation::DevDependencies => "◦",
    };
    print!(
        "   {} {} {}",
        marker,
        dependency.name,
        dependency.version.as_deref().unwrap_or("?")
    );
    if let Some(license) = &dependency.license {
        print!(" [{}]", license);
    }
    println!();
    if let Some(description) = &dependency.description {
        println!("      {}", description);
    }
}

pub fn print_dependencies(project_name: &str, dependencies: &DependencySet) {
    println!("📚 Installed dependencies of {}", project_name);
    println!("{}", "=".repeat(60));

    if dependencies.is_empty() {
        println!("   (none installed)");
        return;
    }

    for location in [
        DependencyLocation::Dependencies,
        DependencyLocation::DevDependencies,
    ] {
        let in_section: Vec<&Dependency> = dependencies
            .values()
            .filter(|d| d.location == location)
            .collect();
        if in_section.is_empty() {
            continue;
        }
        println!("\n{} ({}):", location, in_section.len());
        for dependency in in_section {
            print_dependency(dependency);
        }
    }
}

/// Rough "n units ago" rendering of a timestamp
pub fn format_age(time: SystemTime) -> String {
    let Ok(elapsed) = SystemTime::now().duration_since(time) else {
        return "just now".to_string();
    };
    let secs = elapsed.as_secs();
    match secs {
        0..=59 => "just now".to_string(),
        60..=3_599 => format!("{} minute(s) ago", secs / 60),
        3_600..=86_399 => format!("{} hour(s) ago", secs / 3_600),
        _ => format!("{} day(s) ago", secs / 86_400),
    }
}
