//! Descriptor fixtures.

/// A trimmed-down uVision project with one target, one `Startup` group and
/// the include path `Inc` on the C compiler controls.
pub const MINIMAL_DESCRIPTOR: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no" ?>
<Project xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:noNamespaceSchemaLocation="project_projx.xsd">
  <SchemaVersion>2.1</SchemaVersion>
  <Header>### uVision Project, (C) Keil Software</Header>
  <Targets>
    <Target>
      <TargetName>Demo</TargetName>
      <ToolsetNumber>0x4</ToolsetNumber>
      <TargetOption>
        <TargetArmAds>
          <Cads>
            <VariousControls>
              <MiscControls></MiscControls>
              <Define>USE_HAL_DRIVER</Define>
              <Undefine></Undefine>
              <IncludePath>Inc</IncludePath>
            </VariousControls>
          </Cads>
          <Aads>
            <VariousControls>
              <IncludePath></IncludePath>
            </VariousControls>
          </Aads>
        </TargetArmAds>
      </TargetOption>
      <Groups>
        <Group>
          <GroupName>Startup</GroupName>
          <Files>
            <File>
              <FileName>startup.s</FileName>
              <FileType>2</FileType>
              <FilePath>startup.s</FilePath>
            </File>
          </Files>
        </Group>
      </Groups>
    </Target>
  </Targets>
</Project>
"#;

/// Same target without any `<IncludePath>` element and an empty group list.
pub const BARE_DESCRIPTOR: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Project>
  <Targets>
    <Target>
      <TargetOption>
        <TargetArmAds>
          <Cads>
            <VariousControls>
              <Define></Define>
            </VariousControls>
          </Cads>
        </TargetArmAds>
      </TargetOption>
      <Groups/>
    </Target>
  </Targets>
</Project>
"#;

/// Well-formed XML that has neither groups nor compiler controls.
pub const FOREIGN_DESCRIPTOR: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Project><SchemaVersion>2.1</SchemaVersion></Project>
"#;
