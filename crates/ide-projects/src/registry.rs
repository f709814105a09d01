/// One installable IDE family.
///
/// `config_dir_prefix` is relative to the platform configuration root and
/// matches every versioned settings directory of the family, e.g.
/// `JetBrains/CLion` matches `JetBrains/CLion2023.3` and `JetBrains/CLion2024.1`.
/// `binaries` is tried in order and the first existing name wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppDescriptor {
    pub name: &'static str,
    pub icon: &'static str,
    pub config_dir_prefix: &'static str,
    pub binaries: &'static [&'static str],
}

pub const APPLICATIONS: &[AppDescriptor] = &[
    AppDescriptor {
        name: "Android Studio",
        icon: "icons/androidstudio.png",
        config_dir_prefix: "Google/AndroidStudio",
        binaries: &[
            "studio",
            "androidstudio",
            "android-studio",
            "android-studio-canary",
            "jdk-android-studio",
            "android-studio-system-jdk",
        ],
    },
    AppDescriptor {
        name: "CLion",
        icon: "icons/clion.png",
        config_dir_prefix: "JetBrains/CLion",
        binaries: &["clion", "clion-eap"],
    },
    AppDescriptor {
        name: "DataGrip",
        icon: "icons/datagrip.png",
        config_dir_prefix: "JetBrains/DataGrip",
        binaries: &["datagrip", "datagrip-eap"],
    },
    AppDescriptor {
        name: "DataSpell",
        icon: "icons/dataspell.png",
        config_dir_prefix: "JetBrains/DataSpell",
        binaries: &["dataspell", "dataspell-eap"],
    },
    AppDescriptor {
        name: "GoLand",
        icon: "icons/goland.png",
        config_dir_prefix: "JetBrains/GoLand",
        binaries: &["goland", "goland-eap"],
    },
    AppDescriptor {
        name: "IntelliJ IDEA",
        icon: "icons/idea.png",
        config_dir_prefix: "JetBrains/IntelliJIdea",
        binaries: &[
            "idea",
            "idea.sh",
            "idea-ultimate",
            "idea-ce-eap",
            "idea-ue-eap",
            "intellij-idea-ce",
            "intellij-idea-ce-eap",
            "intellij-idea-ue-bundled-jre",
            "intellij-idea-ultimate-edition",
            "intellij-idea-community-edition-jre",
            "intellij-idea-community-edition-no-jre",
        ],
    },
    AppDescriptor {
        name: "PhpStorm",
        icon: "icons/phpstorm.png",
        config_dir_prefix: "JetBrains/PhpStorm",
        binaries: &["phpstorm", "phpstorm-eap"],
    },
    AppDescriptor {
        name: "PyCharm",
        icon: "icons/pycharm.png",
        config_dir_prefix: "JetBrains/PyCharm",
        binaries: &["charm", "pycharm", "pycharm-eap"],
    },
    AppDescriptor {
        name: "Rider",
        icon: "icons/rider.png",
        config_dir_prefix: "JetBrains/Rider",
        binaries: &["rider", "rider-eap"],
    },
    AppDescriptor {
        name: "RubyMine",
        icon: "icons/rubymine.png",
        config_dir_prefix: "JetBrains/RubyMine",
        binaries: &[
            "rubymine",
            "rubymine-eap",
            "jetbrains-rubymine",
            "jetbrains-rubymine-eap",
        ],
    },
    AppDescriptor {
        name: "WebStorm",
        icon: "icons/webstorm.png",
        config_dir_prefix: "JetBrains/WebStorm",
        binaries: &["webstorm", "webstorm-eap"],
    },
    AppDescriptor {
        name: "RustRover",
        icon: "icons/rustrover.png",
        config_dir_prefix: "JetBrains/RustRover",
        binaries: &["rustrover", "rustrover-eap"],
    },
];

pub fn find_application(name: &str) -> Option<&'static AppDescriptor> {
    let wanted = name.trim();
    APPLICATIONS
        .iter()
        .find(|app| app.name.eq_ignore_ascii_case(wanted))
}
